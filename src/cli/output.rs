//! Output writers for the CLI: pretty JSON, or one tab-separated record per
//! line. In `lines` mode control characters in content are escaped so each
//! record stays on one line.

use serde::Serialize;
use std::io::Write;

use crate::OutputFormat;
use crate::core::autocomplete::MentionQuery;
use crate::core::roster::RosterUser;
use crate::core::segment::Segment;

use super::CliError;

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Escapes `\`, tab, CR and LF.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// `kind<TAB>content<TAB>userId` per segment; `userId` is empty unless the
/// segment is a resolved mention.
pub fn write_segments<W: Write>(
    out: &mut W,
    segments: &[Segment<'_>],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, segments),
        OutputFormat::Lines => {
            for seg in segments {
                let user_id = seg.as_mention().and_then(|m| m.user_id()).unwrap_or("");
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    seg.kind().as_str(),
                    escape(seg.content()),
                    escape(user_id)
                )?;
            }
            Ok(())
        }
    }
}

pub fn write_names<W: Write>(
    out: &mut W,
    names: &[String],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, names),
        OutputFormat::Lines => {
            for name in names {
                writeln!(out, "{name}")?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct CompletionReport<'a> {
    query: Option<&'a MentionQuery<'a>>,
    suggestions: &'a [&'a RosterUser],
}

/// Lines mode: `@<query>` on the first line (empty when no mention is being
/// typed), then `id<TAB>username<TAB>label` per suggestion.
pub fn write_completion<W: Write>(
    out: &mut W,
    query: Option<&MentionQuery<'_>>,
    suggestions: &[&RosterUser],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, &CompletionReport { query, suggestions }),
        OutputFormat::Lines => {
            match query {
                Some(q) => writeln!(out, "@{}", escape(q.query))?,
                None => writeln!(out)?,
            }
            for user in suggestions {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    escape(&user.id),
                    escape(&user.username),
                    escape(user.label())
                )?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::roster;

    #[test]
    fn test_escape_control_chars() {
        assert_eq!(escape("a\tb\nc\\d\r"), "a\\tb\\nc\\\\d\\r");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_names_json_is_array() {
        let mut out = Vec::new();
        write_names(&mut out, &[], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn test_completion_lines() {
        let users = roster();
        let picks: Vec<&RosterUser> = users.iter().skip(1).take(1).collect();
        let query = MentionQuery { start: 0, query: "ca" };
        let mut out = Vec::new();
        write_completion(&mut out, Some(&query), &picks, OutputFormat::Lines).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "@ca\n2\tcarol\tCarol King\n");
    }
}
