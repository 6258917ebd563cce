//! Dataset line splitting
//!
//! Commas separate fields except inside parentheses, so a serving annotation
//! such as "Yogurt (plain, 1 cup)" stays in one field.

/// Split one input line into trimmed fields
///
/// Parentheses are not validated: a stray ')' drives the depth below zero,
/// which re-enables splitting immediately.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in line.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth <= 0 => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}
