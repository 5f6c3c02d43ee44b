use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s.trim())?.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offsets_into_utc() {
        let parsed = from_rfc3339("2024-05-01T12:30:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:30:00+00:00");
    }

    #[test]
    fn rejects_non_rfc3339_input() {
        assert!(from_rfc3339("01/05/2024 10:30").is_err());
        assert!(from_rfc3339("").is_err());
    }
}
