use anyhow::{Context, Result};
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::path::Path;

use super::Codemod;

/// Rewrite deprecated `.withOpacity(x)` calls to `.withAlpha(n)`
pub struct OpacityToAlpha {
    pattern: Regex,
}

impl Default for OpacityToAlpha {
    fn default() -> Self {
        // Matches single-line calls like `.withOpacity(0.3)` as well as the
        // multi-line form with a trailing comma before the closing paren:
        //
        //   .withOpacity(
        //       0.3,
        //   )
        Self {
            pattern: Regex::new(r"\.withOpacity\(\s*([0-9.]+)\s*,?\s*\)").unwrap(),
        }
    }
}

impl Codemod for OpacityToAlpha {
    fn name(&self) -> &'static str {
        "opacity-to-alpha"
    }

    fn apply(&self, path: &Path, content: &str) -> Result<Option<String>> {
        let mut rewritten = String::with_capacity(content.len());
        let mut cursor = 0;
        let mut replaced = 0;

        for caps in self.pattern.captures_iter(content) {
            let call = caps.get(0).unwrap();
            let literal = caps.get(1).unwrap().as_str();

            let alpha = opacity_to_alpha(literal).with_context(|| {
                format!(
                    "Invalid opacity `{literal}` in {}: `{}`",
                    path.display(),
                    call.as_str()
                )
            })?;

            rewritten.push_str(&content[cursor..call.start()]);
            rewritten.push_str(&format!(".withAlpha({alpha})"));
            cursor = call.end();
            replaced += 1;
        }

        if replaced == 0 {
            return Ok(None);
        }

        rewritten.push_str(&content[cursor..]);
        Ok(Some(rewritten))
    }
}

/// Scale an opacity literal to an integer alpha in [0, 255].
///
/// Decimal arithmetic keeps the midpoint exact (`0.3 * 255 == 76.5`), which
/// then rounds away from zero to `77`.
fn opacity_to_alpha(literal: &str) -> Result<i64> {
    let opacity: Decimal = literal.parse()?;
    let alpha = opacity
        .checked_mul(Decimal::from(255))
        .context("opacity value out of range")?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    alpha.to_i64().context("alpha value out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(content: &str) -> Result<Option<String>> {
        OpacityToAlpha::default().apply(Path::new("test.dart"), content)
    }

    #[test]
    fn test_opacity_to_alpha_scaling() -> Result<()> {
        assert_eq!(opacity_to_alpha("0")?, 0);
        assert_eq!(opacity_to_alpha("1")?, 255);
        assert_eq!(opacity_to_alpha("1.0")?, 255);
        assert_eq!(opacity_to_alpha("0.25")?, 64);
        assert_eq!(opacity_to_alpha("0.08")?, 20);

        // Midpoints round away from zero
        assert_eq!(opacity_to_alpha("0.3")?, 77);
        assert_eq!(opacity_to_alpha("0.5")?, 128);

        Ok(())
    }

    #[test]
    fn test_malformed_numeral_is_rejected() {
        assert!(opacity_to_alpha("1.2.3").is_err());

        let err = rewrite("final c = color.withOpacity(1.2.3);").unwrap_err();
        assert!(err.to_string().contains("test.dart"));
        assert!(err.to_string().contains(".withOpacity(1.2.3)"));
    }

    #[test]
    fn test_single_call() -> Result<()> {
        let result = rewrite("final c = Colors.red.withOpacity(0.3);")?;
        assert_eq!(
            result.as_deref(),
            Some("final c = Colors.red.withAlpha(77);")
        );
        Ok(())
    }

    #[test]
    fn test_bounds() -> Result<()> {
        assert_eq!(rewrite("c.withOpacity(1)")?.as_deref(), Some("c.withAlpha(255)"));
        assert_eq!(rewrite("c.withOpacity(0)")?.as_deref(), Some("c.withAlpha(0)"));
        Ok(())
    }

    #[test]
    fn test_inner_whitespace() -> Result<()> {
        assert_eq!(
            rewrite("c.withOpacity( 0.3 )")?.as_deref(),
            Some("c.withAlpha(77)")
        );
        Ok(())
    }

    #[test]
    fn test_multiline_trailing_comma() -> Result<()> {
        let content = "Colors.black.withOpacity(\n  0.5,\n);";
        assert_eq!(
            rewrite(content)?.as_deref(),
            Some("Colors.black.withAlpha(128);")
        );
        Ok(())
    }

    #[test]
    fn test_multiple_occurrences() -> Result<()> {
        let content = "a.withOpacity(0.1);\nb.withOpacity(0.9);\n";
        assert_eq!(
            rewrite(content)?.as_deref(),
            Some("a.withAlpha(26);\nb.withAlpha(230);\n")
        );
        Ok(())
    }

    #[test]
    fn test_clean_content_untouched() -> Result<()> {
        assert!(rewrite("final c = Colors.red.withAlpha(77);")?.is_none());
        assert!(rewrite("final c = Colors.red;")?.is_none());
        assert!(rewrite("")?.is_none());
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<()> {
        let first = rewrite("x.withOpacity(0.42)")?.unwrap();
        assert_eq!(first, "x.withAlpha(107)");
        assert!(rewrite(&first)?.is_none());
        Ok(())
    }
}
