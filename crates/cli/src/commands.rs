//! Clap command tree definition.

use clap::{Arg, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("capstore")
        .about("Inspect and manage a capstore payload database")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Config file (default: ./capstore.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .help("Database file, overrides the config")
                .global(true),
        )
        .arg(
            Arg::new("bucket")
                .long("bucket")
                .help("Bucket name, overrides the config")
                .global(true),
        )
        .subcommand(Command::new("count").about("Print the number of stored records"))
        .subcommand(
            Command::new("keys").about("Print every stored key (invalid UTF-8 shown lossily)"),
        )
        .subcommand(
            Command::new("list").about("Print every decodable payload as one JSON line"),
        )
        .subcommand(
            Command::new("get")
                .about("Print the raw value stored under a key")
                .arg(Arg::new("key").required(true)),
        )
        .subcommand(Command::new("wipe").about("Delete the bucket and all its records"))
        .subcommand(
            Command::new("init").about("Write a default capstore.toml if none exists"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["capstore", "count", "--db", "x.db", "--bucket", "b"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("db").unwrap(), "x.db");
        assert_eq!(matches.get_one::<String>("bucket").unwrap(), "b");
        assert_eq!(matches.subcommand_name(), Some("count"));
    }

    #[test]
    fn test_get_requires_key() {
        assert!(build_cli()
            .try_get_matches_from(["capstore", "get"])
            .is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(build_cli().try_get_matches_from(["capstore"]).is_err());
    }
}
