use clap::Parser;
use catat::cli::{
    run_add, run_backup, run_delete, run_edit, run_export, run_list, run_search, run_show, Cli,
    Commands,
};
use catat::db::NoteStore;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = NoteStore::initialize(&cli.store_config())?;

    match cli.command {
        None => {
            // No subcommand provided - list everything
            run_list(&store, false)?;
        }
        Some(Commands::List(args)) => {
            run_list(&store, args.json)?;
        }
        Some(Commands::Show(args)) => {
            run_show(&store, args.id)?;
        }
        Some(Commands::Add(args)) => {
            run_add(&store, args.title, args.body, args.source)?;
        }
        Some(Commands::Edit(args)) => {
            let id = args.id;
            run_edit(&store, id, args.into())?;
        }
        Some(Commands::Delete(args)) => {
            run_delete(&store, args.id, args.force)?;
        }
        Some(Commands::Search(args)) => {
            run_search(&store, &args.query, args.literal, args.json)?;
        }
        Some(Commands::Export(args)) => {
            run_export(&store, &args.path, args.query.as_deref(), args.literal)?;
        }
        Some(Commands::Backup(args)) => {
            run_backup(&store, &args.path)?;
        }
    }

    Ok(())
}
