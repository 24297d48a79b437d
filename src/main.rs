use clap::Parser;
use oastool::cli::commands::{compile, layout, models, query, spec};
use oastool::cli::errors::print_error_with_json;
use oastool::cli::render::Output;
use oastool::cli::tracing_init::init_tracing;
use oastool::cli::{
    Cli, Commands, LayoutCommands, ModelCommands, OpsCommands, PathCommands, TagCommands,
};
use oastool::error::Error;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    init_tracing(cli.verbosity);

    match run_command(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error_with_json(&e, json_errors);
            std::process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> Result<bool, Error> {
    let output = Output::new(cli.quiet, cli.json_errors, cli.format);

    match cli.command {
        Commands::Layout { command } => match command {
            LayoutCommands::Check { layout, start } => {
                layout::execute_layout_check(&layout, &start, &output)
            }
            LayoutCommands::Validate {
                layout,
                spec,
                start,
            } => layout::execute_layout_validate(&layout, &spec, &start, &output),
        },
        Commands::Compile {
            layout,
            spec,
            start,
            config,
            include_bugged,
        } => compile::execute_compile(
            &layout,
            &spec,
            start.as_deref(),
            config.as_deref(),
            include_bugged,
            &output,
        ),
        Commands::Diff { old, new, summary } => spec::execute_diff(&old, &new, summary, &output),
        Commands::Models { command } => match command {
            ModelCommands::Uses { spec, model } => models::execute_models_uses(&spec, &model, &output),
            ModelCommands::UsedBy { spec, model } => {
                models::execute_models_used_by(&spec, &model, &output)
            }
            ModelCommands::Ops { spec, model } => models::execute_models_ops(&spec, &model, &output),
        },
        Commands::Ops { command } => match command {
            OpsCommands::List { spec } => models::execute_ops_list(&spec, &output),
            OpsCommands::Models { spec, operation } => {
                models::execute_ops_models(&spec, &operation, &output)
            }
        },
        Commands::Paths { command } => match command {
            PathCommands::List { spec, contains } => {
                query::execute_paths_list(&spec, contains.as_deref(), &output)
            }
            PathCommands::Show {
                spec,
                path,
                sub_paths,
            } => query::execute_paths_show(&spec, &path, sub_paths, &output),
            PathCommands::Ops {
                spec,
                path,
                sub_paths,
            } => query::execute_paths_ops(&spec, &path, sub_paths, &output),
        },
        Commands::Tags { command } => match command {
            TagCommands::List { spec, contains } => {
                query::execute_tags_list(&spec, contains.as_deref(), &output)
            }
            TagCommands::Show { spec, tag } => query::execute_tags_show(&spec, &tag, &output),
        },
        Commands::Summary { spec } => query::execute_summary(&spec, &output),
        Commands::Prune {
            spec: spec_path,
            remove_ops,
            allow_ops,
            remove_tags,
            nullable_not_required,
        } => spec::execute_prune(
            &spec_path,
            &remove_ops,
            &allow_ops,
            remove_tags,
            nullable_not_required,
            &output,
        ),
    }
}
