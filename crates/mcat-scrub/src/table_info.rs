const PART_SEP: &str = " | ";

/// Trim a captured `table_info` string down to the module facts.
///
/// Keeps ` | `-separated parts up to the first part that starts the
/// enrolment listing (`Code:` or a 6+ digit number, optionally after `:`),
/// and drops empty, organiser, target-size and sequence parts.
pub fn clean_table_info(table_info: &str) -> String {
    if table_info.trim().is_empty() {
        return String::new();
    }

    let mut kept: Vec<&str> = Vec::new();
    for part in table_info.split(PART_SEP).map(str::trim) {
        if starts_enrolment_listing(part) {
            break;
        }
        if part.is_empty()
            || part.contains("Module Organiser")
            || part.contains("Actual (Target)")
            || part.starts_with("Seq:")
        {
            continue;
        }
        kept.push(part);
    }
    kept.join(PART_SEP)
}

fn starts_enrolment_listing(part: &str) -> bool {
    let p = part.trim_start();
    let p = p.strip_prefix(':').unwrap_or(p).trim_start();
    p.starts_with("Code:") || p.chars().take(6).filter(char::is_ascii_digit).count() == 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_enrolment_listing() {
        let ti = "Level 4 | 20 credits | Code: Surname Forename | 100123456 | X";
        assert_eq!(clean_table_info(ti), "Level 4 | 20 credits");

        let ti = "Level 5 | : 100200300 Smith";
        assert_eq!(clean_table_info(ti), "Level 5");
    }

    #[test]
    fn skips_organiser_target_and_sequence_parts() {
        let ti = "SEM1 | Module Organiser: X | Actual (Target): 120 (150) | Seq: 1 | 20 credits";
        assert_eq!(clean_table_info(ti), "SEM1 | 20 credits");
    }

    #[test]
    fn short_numbers_are_kept() {
        assert_eq!(clean_table_info("Room 12345 | ok"), "Room 12345 | ok");
        assert_eq!(clean_table_info("12345 | ok"), "12345 | ok");
    }

    #[test]
    fn empty_parts_are_dropped() {
        assert_eq!(clean_table_info("SEM1 |  | 20"), "SEM1 | 20");
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(clean_table_info(""), "");
        assert_eq!(clean_table_info("   "), "");
    }

    #[test]
    fn already_clean_input_is_unchanged() {
        let ti = "SEM1 | 20 credits";
        assert_eq!(clean_table_info(ti), ti);
        assert_eq!(clean_table_info(&clean_table_info(ti)), ti);
    }
}
