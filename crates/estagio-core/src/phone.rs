//! Phone normalisation.
//!
//! Phones are stored in canonical form: ASCII digits only, two-digit area
//! code followed by an eight- or nine-digit number. The masked form is only
//! ever derived for display or while the applicant is typing.

/// Two area-code digits plus a nine-digit mobile number.
pub const MAX_DIGITS: usize = 11;

/// The shortest complete number: area code plus an eight-digit landline.
pub const MIN_DIGITS: usize = 10;

const WHATSAPP_BASE: &str = "https://wa.me/55";

/// Drop every character that is not an ASCII digit.
pub fn strip(input: &str) -> String {
  input.chars().filter(char::is_ascii_digit).collect()
}

/// The input mask applied on every keystroke: `(DD) DDDDD-DDDD`, filled
/// progressively as digits arrive. Digits past [`MAX_DIGITS`] are dropped.
pub fn mask(input: &str) -> String {
  let digits: String = strip(input).chars().take(MAX_DIGITS).collect();
  if digits.is_empty() {
    return String::new();
  }

  let (area, rest) = digits.split_at(digits.len().min(2));
  let mut out = format!("({area}");
  if rest.is_empty() {
    return out;
  }

  out.push_str(") ");
  let (head, tail) = rest.split_at(rest.len().min(5));
  out.push_str(head);
  if !tail.is_empty() {
    out.push('-');
    out.push_str(tail);
  }
  out
}

/// Render a stored phone for display.
///
/// Eleven or more digits use the mobile layout, exactly ten use the landline
/// layout; anything shorter is shown as bare digits.
pub fn format_display(stored: &str) -> String {
  let digits = strip(stored);
  match digits.len() {
    n if n > MIN_DIGITS => format!(
      "({}) {}-{}{}",
      &digits[..2],
      &digits[2..7],
      &digits[7..11],
      &digits[11..]
    ),
    MIN_DIGITS => {
      format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..])
    }
    _ => digits,
  }
}

/// Messaging deep link for a stored phone, prefixed with the Brazil country
/// code.
pub fn whatsapp_link(stored: &str) -> String {
  format!("{WHATSAPP_BASE}{}", strip(stored))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strip_keeps_only_digits() {
    assert_eq!(strip("(11) 98765-4321"), "11987654321");
    assert_eq!(strip("abc"), "");
    assert_eq!(strip("+55 11 ٣"), "5511");
  }

  #[test]
  fn mask_fills_progressively() {
    assert_eq!(mask(""), "");
    assert_eq!(mask("1"), "(1");
    assert_eq!(mask("11"), "(11");
    assert_eq!(mask("119"), "(11) 9");
    assert_eq!(mask("1198765"), "(11) 98765");
    assert_eq!(mask("11987654"), "(11) 98765-4");
    assert_eq!(mask("11987654321"), "(11) 98765-4321");
  }

  #[test]
  fn mask_truncates_past_eleven_digits() {
    assert_eq!(mask("1198765432199"), "(11) 98765-4321");
  }

  #[test]
  fn mask_ignores_existing_punctuation() {
    assert_eq!(mask("(11) 98765-4321"), "(11) 98765-4321");
    assert_eq!(mask("(11) 98765-43210"), "(11) 98765-4321");
  }

  #[test]
  fn mask_is_stable_through_strip() {
    let inputs = [
      "",
      "1",
      "(11",
      "11 9",
      "(11) 98765-43",
      "119876543219999",
      "tel: 21 3333-4444",
      "--",
    ];
    for x in inputs {
      assert_eq!(mask(&strip(&mask(x))), mask(&strip(x)), "input {x:?}");
    }
  }

  #[test]
  fn display_mobile_and_landline() {
    assert_eq!(format_display("11987654321"), "(11) 98765-4321");
    assert_eq!(format_display("1133334444"), "(11) 3333-4444");
  }

  #[test]
  fn display_rederives_mask_from_masked_input() {
    assert_eq!(format_display("(11) 98765-4321"), "(11) 98765-4321");
  }

  #[test]
  fn display_short_numbers_are_bare_digits() {
    assert_eq!(format_display("123"), "123");
    assert_eq!(format_display(""), "");
  }

  #[test]
  fn whatsapp_link_prefixes_country_code() {
    assert_eq!(whatsapp_link("11987654321"), "https://wa.me/5511987654321");
  }
}
