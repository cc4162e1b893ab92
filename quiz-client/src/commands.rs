use quiz_core::SortOption;
use quiz_types::Tag;

/// One line of terminal input. Anything not starting with `:` is a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    Reset,
    Submit(String),
    Browse(Option<String>),
    Tag(Tag),
    Sort(SortOption),
    Bookmark(String),
    Leaderboard,
    Status,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Command::Guess(line.to_string());
        };

        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (command, ""),
        };

        match name.to_lowercase().as_str() {
            "reset" => Command::Reset,
            "submit" if !argument.is_empty() => Command::Submit(argument.to_string()),
            "browse" | "search" => Command::Browse((!argument.is_empty()).then(|| argument.to_string())),
            "tag" => argument
                .parse()
                .map(Command::Tag)
                .unwrap_or_else(Command::Invalid),
            "sort" => argument
                .parse()
                .map(Command::Sort)
                .unwrap_or_else(Command::Invalid),
            "bookmark" if !argument.is_empty() => Command::Bookmark(argument.to_string()),
            "leaderboard" | "scores" => Command::Leaderboard,
            "status" => Command::Status,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "submit" | "bookmark" => Command::Invalid(format!(":{} needs an argument", name)),
            other => Command::Invalid(format!("Unknown command: :{}", other)),
        }
    }
}

pub const HELP: &str = "\
Type a champion name to guess.
  :status                 lives, score and progress
  :reset                  start over
  :submit <name>          save your score after game over
  :browse [search]        list champions, optionally filtered by name
  :tag <tag>              toggle a tag filter (Assassin, Fighter, Mage, Marksman, Support, Tank)
  :sort <option>          name, difficulty or favorites
  :bookmark <champion>    toggle a bookmark
  :leaderboard            show high scores
  :quit                   leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_guess() {
        assert_eq!(Command::parse("  Kai'Sa "), Command::Guess("Kai'Sa".to_string()));
        assert_eq!(Command::parse(""), Command::Guess(String::new()));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(Command::parse(":submit  Alice "), Command::Submit("Alice".to_string()));
        assert_eq!(Command::parse(":browse ah"), Command::Browse(Some("ah".to_string())));
        assert_eq!(Command::parse(":browse"), Command::Browse(None));
        assert_eq!(Command::parse(":tag mage"), Command::Tag(Tag::Mage));
        assert_eq!(Command::parse(":SORT difficulty"), Command::Sort(SortOption::Difficulty));
        assert_eq!(Command::parse(":bookmark Zed"), Command::Bookmark("Zed".to_string()));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(Command::parse(":submit"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":tag jungler"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":dance"), Command::Invalid(_)));
    }
}
