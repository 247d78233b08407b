use super::*;

#[test]
fn to_thousands_groups_integer_part_and_keeps_fraction() {
    assert_eq!(to_thousands(1234567.89), "1,234,567.89");
    assert_eq!(to_thousands(1234567.0), "1,234,567");
    assert_eq!(to_thousands(999.0), "999");
    assert_eq!(to_thousands(1000.0), "1,000");
    assert_eq!(to_thousands(0.5), "0.5");
    assert_eq!(to_thousands(0.0), "0");
}

#[test]
fn to_thousands_keeps_sign_outside_grouping() {
    assert_eq!(to_thousands(-1234567.89), "-1,234,567.89");
    assert_eq!(to_thousands(-999.0), "-999");
}

#[test]
fn format_fixed_uses_parenthesized_negative_convention() {
    assert_eq!(format_fixed(1234.5), "1,234.50");
    assert_eq!(format_fixed(-1234.5), "(1,234.50)");
    assert_eq!(format_fixed(0.0), "0.00");
}

#[test]
fn format_fixed_rate_keeps_the_sign() {
    assert_eq!(format_fixed_rate(5.4321), "5.43");
    assert_eq!(format_fixed_rate(-5.4321), "-5.43");
    assert_eq!(format_fixed_rate(1234.5), "1,234.50");
}

#[test]
fn global_format_fixed_returns_rounded_absolute_number() {
    assert_eq!(global_format_fixed(-1.005), 1.0);
    assert_eq!(global_format_fixed(2.344), 2.34);
    assert_eq!(global_format_fixed(0.0), 0.0);
}

#[test]
fn number_formatter_abbreviates_by_unit_steps() {
    assert_eq!(number_formatter(0.0), "0");
    assert_eq!(number_formatter(999.0), "999");
    assert_eq!(number_formatter(2500.0), "2.5K");
    assert_eq!(number_formatter(1_000_000.0), "1.0M");
    assert_eq!(number_formatter(3_400_000_000.0), "3.4B");
    assert_eq!(number_formatter(1_200_000_000_000.0), "1.2T");
}

#[test]
fn number_formatter_caps_at_the_largest_unit() {
    assert_eq!(number_formatter(2_000_000_000_000_000.0), "2000.0T");
}

#[test]
fn format_type_splits_snake_case_into_title_words() {
    assert_eq!(format_type("single_family"), "Single Family");
    assert_eq!(format_type("condo"), "Condo");
    assert_eq!(format_type(""), "");
}

#[test]
fn capitalize_first_letter_returns_only_the_first_char() {
    assert_eq!(capitalize_first_letter("austin"), "A");
    assert_eq!(capitalize_first_letter(""), "");
}

#[test]
fn sub_content_to_description_strips_tags_and_truncates() {
    assert_eq!(
        sub_content_to_description("<p>Great <b>home</b> near downtown</p>"),
        "Great home near downtown"
    );

    let long = "x".repeat(300);
    assert_eq!(sub_content_to_description(&long).chars().count(), 150);
}
