use serde::{Deserialize, Serialize};
use std::fmt;

/// The atomic units the flow engine consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A hard line break
    Newline,
    /// A single whitespace character other than a newline
    Space(char),
    /// A run of non-whitespace characters
    Word(String),
}

impl Token {
    /// Append the source text of this token to `out`
    pub fn write_to(&self, out: &mut String) {
        match self {
            Token::Newline => out.push('\n'),
            Token::Space(ch) => out.push(*ch),
            Token::Word(word) => out.push_str(word),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Newline => f.write_str("\n"),
            Token::Space(ch) => write!(f, "{ch}"),
            Token::Word(word) => f.write_str(word),
        }
    }
}

/// Whitespace that separates words. Includes the byte order mark, which some editors
/// leave at the start of pasted text.
pub(crate) fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Split `text` into newlines, single whitespace characters and words.
///
/// `\r\n` is normalized to `\n` first; concatenating the tokens reproduces the normalized
/// text exactly.
pub fn tokenize(text: &str) -> Vec<Token> {
    let text = text.replace("\r\n", "\n");
    let mut tokens = Vec::with_capacity(text.len() / 4 + 1);
    let mut chars = text.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch == '\n' {
            tokens.push(Token::Newline);
        } else if is_separator(ch) {
            tokens.push(Token::Space(ch));
        } else {
            let mut end = start + ch.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if is_separator(next) {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            tokens.push(Token::Word(text[start..end].to_string()));
        }
    }

    tokens
}

/// Rebuild the source text from a token stream
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(w: &str) -> Token {
        Token::Word(w.to_string())
    }

    #[test]
    fn splits_words_spaces_and_newlines() {
        assert_eq!(
            tokenize("ab  c\nd"),
            vec![
                word("ab"),
                Token::Space(' '),
                Token::Space(' '),
                word("c"),
                Token::Newline,
                word("d"),
            ]
        );
    }

    #[test]
    fn normalizes_crlf() {
        assert_eq!(
            tokenize("a\r\nb"),
            vec![word("a"), Token::Newline, word("b")]
        );
    }

    #[test]
    fn lone_carriage_return_is_a_space() {
        assert_eq!(
            tokenize("a\rb"),
            vec![word("a"), Token::Space('\r'), word("b")]
        );
    }

    #[test]
    fn whitespace_runs_become_individual_tokens() {
        assert_eq!(
            tokenize("\t\u{00A0}\u{3000}\n\n"),
            vec![
                Token::Space('\t'),
                Token::Space('\u{00A0}'),
                Token::Space('\u{3000}'),
                Token::Newline,
                Token::Newline,
            ]
        );
    }

    #[test]
    fn scripts_without_spaces_form_one_word() {
        assert_eq!(tokenize("日本語のテキスト"), vec![word("日本語のテキスト")]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn round_trips_mixed_content() {
        let text = "  Ünïcödé\r\n\tmixed  text \u{FEFF}with\n\n\r\nemoji 👩‍👩‍👧 ";
        let tokens = tokenize(text);
        assert_eq!(detokenize(&tokens), text.replace("\r\n", "\n"));
        let displayed: String = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(displayed, text.replace("\r\n", "\n"));
    }
}
