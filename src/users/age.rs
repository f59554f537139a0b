use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

pub const BIRTH_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Whole-year age of someone born on `birth_date` (`YYYY-MM-DD`) as of `today`.
///
/// Year difference, minus one when `today` falls earlier in its year than the
/// birth day did in its own. Compares ordinal days, so leap years can shift the
/// result by a day's worth around March 1st. Empty or unparseable dates yield 0.
pub fn age_on(birth_date: &str, today: Date) -> i32 {
    if birth_date.is_empty() {
        return 0;
    }
    let Ok(birth) = Date::parse(birth_date, BIRTH_DATE_FORMAT) else {
        return 0;
    };
    let mut age = today.year() - birth.year();
    if today.ordinal() < birth.ordinal() {
        age -= 1;
    }
    age
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 18);

    #[test]
    fn birthday_already_passed() {
        assert_eq!(age_on("2010-05-15", TODAY), 16);
    }

    #[test]
    fn birthday_not_yet_reached() {
        assert_eq!(age_on("2010-12-01", TODAY), 15);
    }

    #[test]
    fn birthday_is_today() {
        assert_eq!(age_on("2010-10-18", TODAY), 16);
    }

    #[test]
    fn ordinal_comparison_across_leap_year() {
        // 2012-03-01 is day 61, 2026-03-01 is day 60.
        assert_eq!(age_on("2012-03-01", date!(2026 - 03 - 01)), 13);
        assert_eq!(age_on("2012-03-01", date!(2026 - 03 - 02)), 14);
    }

    #[test]
    fn invalid_or_empty_is_zero() {
        assert_eq!(age_on("", TODAY), 0);
        assert_eq!(age_on("invalid-date", TODAY), 0);
        assert_eq!(age_on("2010/05/15", TODAY), 0);
        assert_eq!(age_on("2010-13-01", TODAY), 0);
    }

    #[test]
    fn ten_years_ago_without_leap_shift_is_ten() {
        let today = date!(2025 - 05 - 10);
        let birth = today.replace_year(today.year() - 10).unwrap();
        let formatted = birth.format(BIRTH_DATE_FORMAT).unwrap();
        assert_eq!(age_on(&formatted, today), 10);
    }

    #[test]
    fn same_calendar_day_in_leap_year_lands_one_ordinal_later() {
        // 2016-10-18 is day 292, 2026-10-18 is day 291.
        let birth = TODAY.replace_year(TODAY.year() - 10).unwrap();
        let formatted = birth.format(BIRTH_DATE_FORMAT).unwrap();
        assert_eq!(age_on(&formatted, TODAY), 9);
    }
}
