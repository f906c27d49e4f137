//! Line splitter for Blub assembly text.

/// The pieces of one source line, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitLine<'a> {
    /// Text before the first `:`, trimmed. Empty if the line has no colon.
    pub label: &'a str,
    /// First whitespace-delimited token after the label.
    pub mnemonic: Option<&'a str>,
    /// Remaining tokens, split on whitespace and commas.
    pub operands: Vec<&'a str>,
}

/// Split a single line of assembly text.
///
/// ```text
/// "start: movi r0, 5" → label "start", mnemonic "movi", operands ["r0", "5"]
/// ```
pub(crate) fn split_line(line: &str) -> SplitLine<'_> {
    let (label, body) = match line.split_once(':') {
        Some((label, body)) => (label.trim(), body),
        None => ("", line),
    };

    let body = body.trim_start();
    let (mnemonic, rest) = match body.find(char::is_whitespace) {
        Some(pos) => (&body[..pos], &body[pos..]),
        None => (body, ""),
    };

    let operands = rest
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .collect();

    SplitLine {
        label,
        mnemonic: (!mnemonic.is_empty()).then_some(mnemonic),
        operands,
    }
}
