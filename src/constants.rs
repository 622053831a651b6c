/// File and column name constants shared by every pipeline phase

// Input batches
pub const DEFAULT_INPUT_DIR: &str = "files/input";
pub const DEFAULT_OUTPUT_DIR: &str = "files/output";
pub const BATCH_PATTERN: &str = "bank-marketing-campaing-*.csv.zip";

// Year stamped onto every derived contact date; the source rows carry no year
pub const DEFAULT_CALENDAR_YEAR: i32 = 2022;

// Output files
pub const CLIENT_FILE: &str = "client.csv";
pub const CAMPAIGN_FILE: &str = "campaign.csv";
pub const ECONOMICS_FILE: &str = "economics.csv";

// Key shared by all three output relations
pub const CLIENT_ID: &str = "client_id";

// Client columns
pub const AGE: &str = "age";
pub const JOB: &str = "job";
pub const MARITAL: &str = "marital";
pub const EDUCATION: &str = "education";
pub const CREDIT_DEFAULT: &str = "credit_default";
pub const MORTGAGE: &str = "mortgage";

// Campaign columns
pub const NUMBER_CONTACTS: &str = "number_contacts";
pub const CONTACT_DURATION: &str = "contact_duration";
pub const PREVIOUS_CAMPAIGN_CONTACTS: &str = "previous_campaign_contacts";
pub const PDAYS: &str = "pdays";
pub const PREVIOUS_OUTCOME: &str = "previous_outcome";
pub const CAMPAIGN_OUTCOME: &str = "campaign_outcome";
pub const DAY: &str = "day";
pub const MONTH: &str = "month";
pub const LAST_CONTACT_DATE: &str = "last_contact_date";

// Economics columns
pub const CONS_PRICE_IDX: &str = "cons_price_idx";
pub const EURIBOR_THREE_MONTHS: &str = "euribor_three_months";

/// Source spellings seen in older batches, paired with the canonical name they stand for.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("previous_campaing_contacts", PREVIOUS_CAMPAIGN_CONTACTS),
    ("const_price_idx", CONS_PRICE_IDX),
    ("euribor3m", EURIBOR_THREE_MONTHS),
];

/// Two-digit month number for a three-letter English month abbreviation (case-insensitive)
pub fn month_number(abbrev: &str) -> Option<u32> {
    match abbrev.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_number_ignores_case() {
        assert_eq!(month_number("Jan"), Some(1));
        assert_eq!(month_number("dec"), Some(12));
        assert_eq!(month_number("MAY"), Some(5));
        assert_eq!(month_number("june"), None);
    }

    #[test]
    fn test_aliases_point_at_canonical_names() {
        let canon: Vec<&str> = COLUMN_ALIASES.iter().map(|(_, c)| *c).collect();
        assert_eq!(
            canon,
            vec![PREVIOUS_CAMPAIGN_CONTACTS, CONS_PRICE_IDX, EURIBOR_THREE_MONTHS]
        );
    }
}
