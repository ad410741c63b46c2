//! Command line splitting.
//!
//! A command entry is `[~]name arg arg ...`. Arguments are separated by
//! spaces outside quotes and outside `<...>` tags. A quote only opens at
//! the start of an argument and only closes when followed by a space or
//! the end of the line, so `it's` stays a single plain word.

use crate::parse::structure::LineTrackedString;

/// One argument of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArg {
    /// Argument text with surrounding quotes removed.
    pub text: String,
    /// Whether the argument was quoted.
    pub quoted: bool,
    /// Start column of the argument (0-indexed, including the quote).
    pub start: usize,
    /// End column (exclusive, including the quote).
    pub end: usize,
}

impl CommandArg {
    /// Column where the unquoted text begins.
    pub fn text_start(&self) -> usize {
        if self.quoted {
            self.start + 1
        } else {
            self.start
        }
    }

    /// Split `prefix:value`, returning the lowercase prefix and the value
    /// when the prefix is a plain identifier.
    pub fn switch(&self) -> Option<(String, &str)> {
        let (prefix, value) = self.text.split_once(':')?;
        if prefix.is_empty()
            || !prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return None;
        }
        Some((prefix.to_lowercase(), value))
    }
}

/// A command entry split into its name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCommand {
    /// Whether the entry used the `~` prefix.
    pub waitable: bool,
    /// Lowercase command name.
    pub name: String,
    /// Start column of the name.
    pub name_start: usize,
    pub args: Vec<CommandArg>,
    /// Start column of an argument whose quote never closed.
    pub unclosed_quote: Option<usize>,
}

/// Split a command entry.
pub fn split_command(entry: &LineTrackedString) -> SplitCommand {
    let chars: Vec<char> = entry.text.chars().collect();
    let mut i = 0;
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    let waitable = chars.get(i) == Some(&'~');
    if waitable {
        i += 1;
    }
    let name_start = i;
    while i < chars.len() && chars[i] != ' ' {
        i += 1;
    }
    let name: String = chars[name_start..i].iter().collect::<String>().to_lowercase();

    let mut args = Vec::new();
    let mut unclosed_quote = None;
    loop {
        while i < chars.len() && chars[i] == ' ' {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let start = i;
        if chars[i] == '"' || chars[i] == '\'' {
            let quote = chars[i];
            i += 1;
            let mut closed = None;
            while i < chars.len() {
                if chars[i] == quote && chars.get(i + 1).map_or(true, |c| *c == ' ') {
                    closed = Some(i);
                    break;
                }
                i += 1;
            }
            match closed {
                Some(close) => {
                    args.push(CommandArg {
                        text: chars[start + 1..close].iter().collect(),
                        quoted: true,
                        start: entry.start + start,
                        end: entry.start + close + 1,
                    });
                    i = close + 1;
                }
                None => {
                    unclosed_quote.get_or_insert(entry.start + start);
                    args.push(CommandArg {
                        text: chars[start + 1..].iter().collect(),
                        quoted: true,
                        start: entry.start + start,
                        end: entry.start + chars.len(),
                    });
                    i = chars.len();
                }
            }
            continue;
        }

        let mut depth = 0usize;
        while i < chars.len() {
            match chars[i] {
                ' ' if depth == 0 => break,
                '<' if opens_tag(&chars, i) => depth += 1,
                '>' if depth > 0 => depth -= 1,
                _ => {}
            }
            i += 1;
        }
        args.push(CommandArg {
            text: chars[start..i].iter().collect(),
            quoted: false,
            start: entry.start + start,
            end: entry.start + i,
        });
    }

    SplitCommand {
        waitable,
        name,
        name_start: entry.start + name_start,
        args,
        unclosed_quote,
    }
}

/// Whether the `<` at `index` starts a tag rather than a literal operator.
pub(crate) fn opens_tag(chars: &[char], index: usize) -> bool {
    match chars.get(index + 1) {
        None => false,
        Some(next) => !matches!(next, ' ' | '-' | '=' | '<' | ']'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> SplitCommand {
        split_command(&LineTrackedString::new(text, 0, 6))
    }

    #[test]
    fn splits_name_and_arguments() {
        let cmd = split("Narrate hello world");
        assert_eq!(cmd.name, "narrate");
        assert!(!cmd.waitable);
        let texts: Vec<_> = cmd.args.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["hello", "world"]);
        assert_eq!(cmd.args[0].start, 14);
        assert_eq!(cmd.args[0].end, 19);
    }

    #[test]
    fn waitable_prefix_is_stripped() {
        let cmd = split("~webget https://example.com");
        assert!(cmd.waitable);
        assert_eq!(cmd.name, "webget");
        assert_eq!(cmd.name_start, 7);
    }

    #[test]
    fn quotes_group_words() {
        let cmd = split("narrate \"hello there\" targets:<player>");
        assert_eq!(cmd.args.len(), 2);
        assert!(cmd.args[0].quoted);
        assert_eq!(cmd.args[0].text, "hello there");
        assert_eq!(cmd.args[0].text_start(), cmd.args[0].start + 1);
        assert_eq!(cmd.args[1].switch(), Some(("targets".to_string(), "<player>")));
    }

    #[test]
    fn tags_keep_spaces_inside_one_argument() {
        let cmd = split("narrate <player.name.replace[a].with[b c]> done");
        let texts: Vec<_> = cmd.args.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, ["<player.name.replace[a].with[b c]>", "done"]);
    }

    #[test]
    fn arrows_are_not_tags() {
        let cmd = split("if <[a]> < 3 && <[b]> <= 2");
        assert_eq!(cmd.args.len(), 7);
    }

    #[test]
    fn apostrophes_inside_words_do_not_quote() {
        let cmd = split("narrate it's fine");
        assert_eq!(cmd.args.len(), 2);
        assert!(!cmd.args[0].quoted);
        assert!(cmd.unclosed_quote.is_none());
    }

    #[test]
    fn unclosed_quote_is_recorded() {
        let cmd = split("narrate \"oops no end");
        assert_eq!(cmd.unclosed_quote, Some(14));
        assert_eq!(cmd.args.len(), 1);
        assert_eq!(cmd.args[0].text, "oops no end");
    }

    #[test]
    fn switch_requires_plain_prefix() {
        let cmd = split("narrate <[a]>:b https://x");
        assert_eq!(cmd.args[0].switch(), None);
        assert_eq!(cmd.args[1].switch(), Some(("https".to_string(), "//x")));
    }
}
