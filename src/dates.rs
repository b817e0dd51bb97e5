use chrono::NaiveDate;

// Entry dates arrive as numeric year-month-day with "-" separators and no
// time component; the month may lack its leading zero. Anything else is
// treated as absent by callers.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
