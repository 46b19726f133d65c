use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["staffsync-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["staffsync-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["staffsync-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn sync_defaults_to_live_run() {
    let cli = Cli::try_parse_from(["staffsync-cli", "sync"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sync { dry_run: false })
    ));
}

#[test]
fn sync_accepts_dry_run_flag() {
    let cli = Cli::try_parse_from(["staffsync-cli", "sync", "--dry-run"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Sync { dry_run: true })));
}

#[test]
fn locations_list_defaults_limit() {
    let cli = Cli::try_parse_from(["staffsync-cli", "locations", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Locations {
            command: LocationsCommands::List { limit: 50 }
        })
    ));
}

#[test]
fn locations_list_accepts_limit() {
    let cli =
        Cli::try_parse_from(["staffsync-cli", "locations", "list", "--limit", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Locations {
            command: LocationsCommands::List { limit: 5 }
        })
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let result = Cli::try_parse_from(["staffsync-cli", "collect"]);
    assert!(result.is_err());
}
