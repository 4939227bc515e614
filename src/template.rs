use crate::error::TemplateError;

/// The closed set of fields a report message can substitute. Every field is
/// derived from the single measured value, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    /// Positional `{}` or `{0}`, same value as `seconds`.
    Elapsed,
    Name,
    Seconds,
    Milliseconds,
    Minutes,
}

fn lookup_field(key: &str) -> Option<Field> {
    match key {
        "" | "0" => Some(Field::Elapsed),
        "name" => Some(Field::Name),
        "seconds" => Some(Field::Seconds),
        "milliseconds" => Some(Field::Milliseconds),
        "minutes" => Some(Field::Minutes),
        _ => None,
    }
}

/// Substitutes the recognized fields of `template` with values derived from
/// `seconds`. `{{` and `}}` are literal-brace escapes. Unknown fields and
/// malformed specs fail with a [`TemplateError`] instead of being skipped.
pub(crate) fn render(
    template: &str,
    name: Option<&str>,
    seconds: f64,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => return Err(TemplateError::UnmatchedBrace),
                    }
                }
                render_field(&mut out, &field, name, seconds)?;
            }
            '}' => return Err(TemplateError::UnmatchedBrace),
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn render_field(
    out: &mut String,
    field: &str,
    name: Option<&str>,
    seconds: f64,
) -> Result<(), TemplateError> {
    let (key, spec) = match field.split_once(':') {
        Some((key, spec)) => (key, spec),
        None => (field, ""),
    };

    let field_kind =
        lookup_field(key).ok_or_else(|| TemplateError::UnknownField(key.to_string()))?;

    if field_kind == Field::Name {
        if !spec.is_empty() {
            return Err(TemplateError::InvalidSpec(field.to_string()));
        }
        // Unnamed timers render their missing label as "None".
        out.push_str(name.unwrap_or("None"));
        return Ok(());
    }

    let value = match field_kind {
        Field::Elapsed | Field::Seconds => seconds,
        Field::Milliseconds => seconds * 1000.0,
        Field::Minutes => seconds / 60.0,
        Field::Name => unreachable!(),
    };

    let precision =
        parse_precision(spec).ok_or_else(|| TemplateError::InvalidSpec(field.to_string()))?;
    match precision {
        Some(precision) => out.push_str(&format!("{value:.precision$}")),
        None => out.push_str(&format!("{value}")),
    }
    Ok(())
}

/// Accepts the fixed-precision float specs `.N` and `.Nf`, a bare `f`, or an
/// empty spec. Anything else is unsupported.
fn parse_precision(spec: &str) -> Option<Option<usize>> {
    let spec = spec.strip_suffix('f').unwrap_or(spec);
    if spec.is_empty() {
        return Some(None);
    }
    let digits = spec.strip_prefix('.')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Some(digits.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_shape() {
        let line = render("Elapsed time: {:.4f} seconds", None, 0.25).unwrap();
        assert_eq!(line, "Elapsed time: 0.2500 seconds");
    }

    #[test]
    fn test_positional_and_seconds_are_equivalent() {
        let a = render("{:.3f}", None, 1.5).unwrap();
        let b = render("{0:.3f}", None, 1.5).unwrap();
        let c = render("{seconds:.3f}", None, 1.5).unwrap();
        assert_eq!(a, "1.500");
        assert_eq!(b, a);
        assert_eq!(c, a);
    }

    #[test]
    fn test_derived_unit_fields() {
        let line = render("{milliseconds:.0f} ms, {minutes:.3f} min", None, 1.5).unwrap();
        assert_eq!(line, "1500 ms, 0.025 min");
    }

    #[test]
    fn test_name_field() {
        let line = render("{name}: {seconds:.2f}", Some("NamedTimer"), 0.5).unwrap();
        assert_eq!(line, "NamedTimer: 0.50");
    }

    #[test]
    fn test_missing_name_renders_none() {
        let line = render("{name}: {seconds:.2f}", None, 0.5).unwrap();
        assert_eq!(line, "None: 0.50");
    }

    #[test]
    fn test_no_spec_uses_plain_display() {
        assert_eq!(render("{seconds}", None, 0.5).unwrap(), "0.5");
    }

    #[test]
    fn test_brace_escapes() {
        assert_eq!(render("{{name}}", None, 0.0).unwrap(), "{name}");
        assert_eq!(render("}}{{", None, 0.0).unwrap(), "}{");
    }

    #[test]
    fn test_unknown_field_fails() {
        assert_eq!(
            render("{bogus}", None, 0.0),
            Err(TemplateError::UnknownField("bogus".to_string()))
        );
        // Only one value is measured, so only positional index 0 exists.
        assert_eq!(
            render("{1}", None, 0.0),
            Err(TemplateError::UnknownField("1".to_string()))
        );
    }

    #[test]
    fn test_invalid_spec_fails() {
        assert_eq!(
            render("{seconds:>10}", None, 0.0),
            Err(TemplateError::InvalidSpec("seconds:>10".to_string()))
        );
        // The name is a string, numeric precision does not apply to it.
        assert_eq!(
            render("{name:.2f}", Some("t"), 0.0),
            Err(TemplateError::InvalidSpec("name:.2f".to_string()))
        );
    }

    #[test]
    fn test_unmatched_braces_fail() {
        assert_eq!(render("{seconds", None, 0.0), Err(TemplateError::UnmatchedBrace));
        assert_eq!(render("seconds}", None, 0.0), Err(TemplateError::UnmatchedBrace));
    }

    #[test]
    fn test_precision_spec_forms() {
        assert_eq!(parse_precision(""), Some(None));
        assert_eq!(parse_precision("f"), Some(None));
        assert_eq!(parse_precision(".4"), Some(Some(4)));
        assert_eq!(parse_precision(".4f"), Some(Some(4)));
        assert_eq!(parse_precision(".x"), None);
        assert_eq!(parse_precision("4f"), None);
    }
}
