//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use splice_content::{GroupRule, KeyMove};

/// splice - Insert and replace anchored blocks, relocate JSON keys
#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Fragment text, given inline or read from a file
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct FragmentArgs {
    /// Fragment text; may span several lines
    #[arg(long)]
    pub fragment: Option<String>,

    /// Read the fragment from a file
    #[arg(long, value_name = "PATH")]
    pub fragment_file: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Insert a fragment before the first line containing an anchor
    ///
    /// Examples:
    ///   splice insert Home.jsx --anchor "Common Commands Section" --fragment-file showcase.jsx
    Insert {
        /// File to edit
        file: String,

        /// Literal text identifying the anchor line
        #[arg(long)]
        anchor: String,

        #[command(flatten)]
        fragment: FragmentArgs,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace the block opened by an anchor line and ended by a closing marker
    ///
    /// The close is the first later line equal to the marker (ignoring
    /// surrounding whitespace) with the same indentation as the anchor line.
    /// With --balance-with, opening and closing tokens are counted instead.
    Replace {
        /// File to edit
        file: String,

        /// Literal text identifying the first line of the block
        #[arg(long)]
        anchor: String,

        /// Closing marker, e.g. "</motion.div>"
        #[arg(long)]
        close: String,

        /// Opening token for nesting-aware close matching
        #[arg(long, value_name = "OPEN")]
        balance_with: Option<String>,

        #[command(flatten)]
        fragment: FragmentArgs,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Move JSON keys under a new parent, then group loose members
    ///
    /// Examples:
    ///   splice relocate en.json zh.json --move cta=home --group home.commands=heading,subheading,items
    Relocate {
        /// JSON files, processed in order
        #[arg(required = true)]
        files: Vec<String>,

        /// Move a key: FROM=TO, where TO is a dotted path to an object
        #[arg(long = "move", value_name = "FROM=TO")]
        moves: Vec<KeyMove>,

        /// Group keys under a new object: PARENT.KEY=M1,M2,...
        #[arg(long, value_name = "PARENT.KEY=MEMBERS")]
        group: Option<GroupRule>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run every step of a recipe file (TOML, JSON or YAML)
    Apply {
        /// Recipe file
        recipe: String,

        /// Directory that step paths are relative to [default: the recipe's directory]
        #[arg(long)]
        root: Option<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insert_inline_fragment() {
        let cli = Cli::parse_from([
            "splice",
            "insert",
            "Home.jsx",
            "--anchor",
            "Common Commands",
            "--fragment",
            "<Showcase />",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Insert {
                file: "Home.jsx".into(),
                anchor: "Common Commands".into(),
                fragment: FragmentArgs {
                    fragment: Some("<Showcase />".into()),
                    fragment_file: None,
                },
                dry_run: false,
            })
        );
    }

    #[test]
    fn test_fragment_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "splice",
            "insert",
            "Home.jsx",
            "--anchor",
            "x",
            "--fragment",
            "a",
            "--fragment-file",
            "b.jsx",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fragment_is_required() {
        let result = Cli::try_parse_from(["splice", "insert", "Home.jsx", "--anchor", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_relocate_rules() {
        let cli = Cli::parse_from([
            "splice",
            "-v",
            "relocate",
            "en.json",
            "zh.json",
            "--move",
            "cta=home",
            "--move",
            "plugins=home",
            "--group",
            "home.commands=heading,items",
            "--dry-run",
        ]);
        assert!(cli.verbose);
        let Some(Commands::Relocate {
            files,
            moves,
            group,
            dry_run,
        }) = cli.command
        else {
            panic!("expected relocate command");
        };
        assert_eq!(files, vec!["en.json", "zh.json"]);
        assert_eq!(
            moves,
            vec![KeyMove::new("cta", "home"), KeyMove::new("plugins", "home")]
        );
        let group = group.unwrap();
        assert_eq!(group.parent, "home");
        assert_eq!(group.key, "commands");
        assert_eq!(group.members, vec!["heading", "items"]);
        assert!(dry_run);
    }

    #[test]
    fn test_malformed_move_is_rejected() {
        let result = Cli::try_parse_from(["splice", "relocate", "en.json", "--move", "cta"]);
        assert!(result.is_err());
    }
}
