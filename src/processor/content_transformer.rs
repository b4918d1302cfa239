//! # Content Transformer Module
//!
//! This module turns a file's current content into its stamped form:
//! - Detecting a previously applied header by comparing the first line up to
//!   the year position, so a header from any earlier year is recognised
//! - Stripping that header and the trailing footer to recover the body
//! - Composing header, body and footer back into the final text
//!
//! The header always occupies the first lines of the output. A leading
//! interpreter line (`#!`) gets no special treatment and ends up in the body.
//!
//! Everything here is pure; reading and writing files lives in
//! [`file_io`](super::file_io).

use crate::comment_style::CommentStyle;
use crate::templates::{StyledTemplates, Templates};

/// UTF-8 byte order mark. It is not part of the first line's text.
const BOM: char = '\u{feff}';

/// Result of transforming one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
  /// The full new content of the file.
  pub content: String,
  /// Whether the file already carried a header before this run.
  pub had_header: bool,
}

/// Content transformation for header stamping.
///
/// Borrows the prepared [`Templates`] of the run; it holds no other state.
pub struct ContentTransformer<'a> {
  templates: &'a Templates,
}

impl<'a> ContentTransformer<'a> {
  pub const fn new(templates: &'a Templates) -> Self {
    Self { templates }
  }

  /// Rewrites `content` so it starts with exactly one header and ends with
  /// exactly one footer for `style`.
  ///
  /// Applying this to its own output returns the same text.
  ///
  /// A leading byte order mark is kept as the first bytes of the output and
  /// ignored for detection.
  pub fn transform(&self, style: CommentStyle, content: &str) -> Transformed {
    let styled = self.templates.for_style(style);
    let (bom, text) = match content.strip_prefix(BOM) {
      Some(rest) => (Some(BOM), rest),
      None => (None, content),
    };
    let lines: Vec<&str> = text.lines().collect();

    let had_header = lines.first().is_some_and(|first| has_header(first, styled));
    let body = if had_header { strip_header(&lines, styled) } else { &lines[..] };

    let mut out = String::new();
    out.extend(bom);
    out.push_str(&compose(body, styled));

    Transformed {
      content: out,
      had_header,
    }
  }
}

/// Decides whether `first_line` is the first line of a header from any year.
///
/// Only the text before the year position is compared. A line shorter than
/// that window never matches.
pub fn has_header(first_line: &str, styled: &StyledTemplates) -> bool {
  let Some(expected) = styled.header.first_line() else {
    return false;
  };

  match (first_line.get(..styled.year_offset), expected.get(..styled.year_offset)) {
    (Some(actual), Some(expected)) => actual == expected,
    _ => false,
  }
}

/// Removes a previously applied header and footer, returning the body.
///
/// The top scan drops the leading run of comment lines, capped at the header's
/// length. The bottom scan drops trailing blank lines, then up to the footer's
/// length of comment lines, then the blank separator. Comments inside the body,
/// including ones directly after the header, are kept. A file made only of
/// comments yields an empty body.
pub fn strip_header<'l, 's>(lines: &'l [&'s str], styled: &StyledTemplates) -> &'l [&'s str] {
  let prefix = styled.style.prefix();
  let is_comment = |line: &str| line.starts_with(prefix);

  let start = lines
    .iter()
    .take(styled.header.len())
    .take_while(|line| is_comment(**line))
    .count();

  let mut end = trim_trailing_blank(lines, lines.len());
  let mut footer_budget = styled.footer.len();
  while footer_budget > 0 && end > 0 && is_comment(lines[end - 1]) {
    end -= 1;
    footer_budget -= 1;
  }
  end = trim_trailing_blank(lines, end);

  if end <= start { &[] } else { &lines[start..end] }
}

/// Joins the header, body, a blank line, the footer and a final blank line.
///
/// Trailing blank lines of the body are folded into the single separator.
pub fn compose(body: &[&str], styled: &StyledTemplates) -> String {
  let body = &body[..trim_trailing_blank(body, body.len())];

  let mut out: Vec<&str> = Vec::with_capacity(styled.header.len() + body.len() + styled.footer.len() + 2);
  out.extend(styled.header.lines().iter().map(String::as_str));
  out.extend_from_slice(body);
  out.push("");
  out.extend(styled.footer.lines().iter().map(String::as_str));
  out.push("");

  out.join("\n")
}

fn trim_trailing_blank(lines: &[&str], mut end: usize) -> usize {
  while end > 0 && lines[end - 1].is_empty() {
    end -= 1;
  }
  end
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::templates::{LicenseData, Template};

  fn templates(year: &str) -> Templates {
    let header = Template::from_text("header.txt", "Copyright %year% source2gen\nSee LICENSE for details.");
    let footer = Template::from_text("footer.txt", "Licensed under the MIT license.\n\nEnd of file.");
    Templates::new(&header, &footer, &LicenseData { year: year.to_string() }).expect("valid templates")
  }

  // === Detection ===

  #[test]
  fn test_detects_header_from_earlier_year() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::Hash);
    assert!(has_header("# Copyright 2023 source2gen", styled));
    assert!(has_header("# Copyright 1999 something else entirely", styled));
  }

  #[test]
  fn test_detection_rejects_other_first_lines() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::Hash);
    assert!(!has_header("import os", styled));
    assert!(!has_header("# Copyleft 2023 source2gen", styled));
    assert!(!has_header("// Copyright 2023 source2gen", styled));
    assert!(!has_header("# Copy", styled));
    assert!(!has_header("", styled));
  }

  #[test]
  fn test_detection_does_not_split_multibyte_chars() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::DoubleSlash);
    // Byte offset of the year lands inside the two-byte character.
    assert!(!has_header("// Copyright\u{e9}2023", styled));
  }

  // === Stripping ===

  #[test]
  fn test_strip_removes_header_and_footer() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::DoubleSlash);
    let lines = [
      "// Copyright 2023 source2gen",
      "// See LICENSE for details.",
      "#include <cstdio>",
      "int main() {}",
      "",
      "// Licensed under the MIT license.",
      "//",
      "// End of file.",
    ];
    assert_eq!(strip_header(&lines, styled), &["#include <cstdio>", "int main() {}"]);
  }

  #[test]
  fn test_strip_keeps_interior_and_leading_body_comments() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::Hash);
    let lines = [
      "# Copyright 2023 source2gen",
      "# See LICENSE for details.",
      "# module docs",
      "x = 1",
      "# interior",
      "y = 2",
      "",
      "# Licensed under the MIT license.",
      "#",
      "# End of file.",
    ];
    assert_eq!(
      strip_header(&lines, styled),
      &["# module docs", "x = 1", "# interior", "y = 2"]
    );
  }

  #[test]
  fn test_strip_without_footer_keeps_last_line() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::DoubleSlash);
    let lines = ["// Copyright 2023 source2gen", "// See LICENSE for details.", "int x;"];
    assert_eq!(strip_header(&lines, styled), &["int x;"]);
  }

  #[test]
  fn test_strip_all_comments_yields_empty_body() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::DoubleSlash);
    let lines = ["// Copyright 2023 source2gen", "// a", "// b", "// c"];
    assert!(strip_header(&lines, styled).is_empty());

    let only_first = ["// Copyright 2023 source2gen"];
    assert!(strip_header(&only_first, styled).is_empty());
  }

  // === Composition ===

  #[test]
  fn test_compose_layout() {
    let templates = templates("2024");
    let styled = templates.for_style(CommentStyle::Hash);
    let content = compose(&["x = 1", "", ""], styled);
    assert_eq!(
      content,
      "# Copyright 2024 source2gen\n# See LICENSE for details.\nx = 1\n\n# Licensed under the MIT license.\n#\n# End of file.\n"
    );
  }

  #[test]
  fn test_transform_stamps_unmarked_file() {
    let templates = templates("2024");
    let transformer = ContentTransformer::new(&templates);
    let result = transformer.transform(CommentStyle::DoubleSlash, "int x;\n");
    assert!(!result.had_header);
    assert!(result.content.starts_with("// Copyright 2024 source2gen\n// See LICENSE for details.\nint x;\n\n"));
    assert!(result.content.ends_with("// End of file.\n"));
  }

  #[test]
  fn test_transform_refreshes_year_without_duplicating() {
    let templates = templates("2024");
    let transformer = ContentTransformer::new(&templates);
    let old = "# Copyright 2023 source2gen\n# See LICENSE for details.\nx = 1\n\n# Licensed under the MIT license.\n#\n# End of file.\n";
    let result = transformer.transform(CommentStyle::Hash, old);
    assert!(result.had_header);
    assert_eq!(result.content.matches("Copyright").count(), 1);
    assert!(result.content.starts_with("# Copyright 2024 source2gen\n"));
  }

  #[test]
  fn test_transform_is_idempotent() {
    let templates = templates("2024");
    let transformer = ContentTransformer::new(&templates);
    let inputs = [
      "",
      "\n\n",
      "int x;",
      "// leading comment\nint x;\n// trailing comment\n",
      "int x;\n\n\n",
      "#include <a.h>\n\n// note\nint y;\n",
    ];
    for input in inputs {
      let once = transformer.transform(CommentStyle::DoubleSlash, input).content;
      let twice = transformer.transform(CommentStyle::DoubleSlash, &once).content;
      assert_eq!(once, twice, "input: {input:?}");
    }
  }

  #[test]
  fn test_shebang_goes_below_header() {
    let templates = templates("2024");
    let transformer = ContentTransformer::new(&templates);
    let once = transformer.transform(CommentStyle::Hash, "#!/usr/bin/env python3\nx = 1\n");

    assert!(!once.had_header);
    let lines: Vec<&str> = once.content.lines().collect();
    let header = templates.for_style(CommentStyle::Hash).header.lines();
    assert_eq!(&lines[..header.len()], header);
    assert_eq!(lines[header.len()], "#!/usr/bin/env python3");

    let twice = transformer.transform(CommentStyle::Hash, &once.content);
    assert!(twice.had_header);
    assert_eq!(once.content, twice.content);
  }

  #[test]
  fn test_bom_is_kept_and_ignored_for_detection() {
    let templates = templates("2024");
    let transformer = ContentTransformer::new(&templates);
    let old = "\u{feff}// Copyright 2023 source2gen\n// See LICENSE for details.\nint x;\n";

    let once = transformer.transform(CommentStyle::DoubleSlash, old);
    assert!(once.had_header);
    assert!(once.content.starts_with("\u{feff}// Copyright 2024 source2gen\n"));
    assert_eq!(once.content.matches("Copyright").count(), 1);

    let twice = transformer.transform(CommentStyle::DoubleSlash, &once.content);
    assert_eq!(once.content, twice.content);
  }
}
