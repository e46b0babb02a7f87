use anyhow::{bail, Context, Result};
use chrono::Local;
use handover_client::{poll_until_terminal, HttpJobApi, JobApi};
use handover_core::{Msg, SubmissionSpec};

use console_logging::{console_error, console_info};

use crate::app::Console;
use crate::cli::Command;
use crate::config::ConsoleConfig;
use crate::effects::EffectRunner;
use crate::render;

pub async fn run(command: Command, config: &ConsoleConfig) -> Result<()> {
    if let Command::Config = command {
        print!("{}", config.to_ron()?);
        return Ok(());
    }

    let api = HttpJobApi::new(&config.base_url, config.api_settings())
        .with_context(|| format!("connecting to {}", config.base_url))?;
    let mut console = Console::new(EffectRunner::new(api, config.export_dir.clone()));

    match command {
        Command::List {
            release,
            json,
            markup,
        } => list(&mut console, config.release_or(release), json, markup).await,
        Command::Show { token, markup } => show(&mut console, &token, markup).await,
        Command::Watch {
            token,
            interval,
            max_polls,
        } => {
            let settings = config.poll_settings(interval, max_polls);
            watch(console.api(), &token, &settings).await
        }
        Command::Export { release, title } => {
            export(&mut console, config.release_or(release), title).await
        }
        Command::Hosts { name, markup } => {
            let page = console.api().source_hosts(&name).await?;
            if markup {
                println!("{}", render::hosts_markup(&page));
            } else {
                println!("{}", render::hosts_table(&page));
            }
            Ok(())
        }
        Command::Databases { host, port, search } => {
            let page = console.api().databases(&host, &port, &search).await?;
            println!("{}", render::databases_text(&page));
            Ok(())
        }
        Command::Submit {
            host_uri,
            database,
            contact,
            comment,
        } => submit(console.api(), &host_uri, &database, &contact, &comment).await,
        Command::Config => Ok(()),
    }
}

async fn list<A: JobApi>(
    console: &mut Console<A>,
    release: Option<String>,
    json: bool,
    markup: bool,
) -> Result<()> {
    if json {
        let records = console.api().list_jobs(release.as_deref()).await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let view = console.load_jobs(release).await;
    if let Some(error) = &view.list_error {
        bail!("unable to list handovers: {error}");
    }
    if markup {
        println!("{}", render::jobs_markup(&view));
    } else {
        println!("{}", render::jobs_table(&view));
    }
    Ok(())
}

async fn show<A: JobApi>(console: &mut Console<A>, token: &str, markup: bool) -> Result<()> {
    let view = console
        .dispatch(Msg::RowExpanded {
            token: token.to_string(),
        })
        .await
        .unwrap_or_else(|| console.view());
    let token = token.trim();
    let detail = view.details.get(token);
    if markup {
        println!("{}", render::detail_markup(token, detail));
    } else {
        println!("{}", render::detail_text(token, detail));
    }
    Ok(())
}

async fn watch<A: JobApi>(
    api: &A,
    token: &str,
    settings: &handover_client::PollSettings,
) -> Result<()> {
    let outcome = poll_until_terminal(api, token, settings, |record| {
        println!("{}", render::watch_line(&Local::now(), record));
    })
    .await?;
    if !outcome.finished {
        console_info!("Stopped watching {} after {} polls", token, outcome.polls);
        println!("still running after {} polls", outcome.polls);
    }
    Ok(())
}

async fn export<A: JobApi>(
    console: &mut Console<A>,
    release: Option<String>,
    title: Option<String>,
) -> Result<()> {
    let listed = console.load_jobs(release.clone()).await;
    if let Some(error) = &listed.list_error {
        bail!("unable to list handovers: {error}");
    }
    let title = title.or(release).unwrap_or_default();
    let view = console
        .dispatch(Msg::ExportRequested { title })
        .await
        .unwrap_or_else(|| console.view());
    let text = render::export_text(&view);
    println!("{text}");
    if matches!(view.export, Some(handover_core::ExportStatus::Failed { .. })) {
        bail!(text);
    }
    Ok(())
}

async fn submit<A: JobApi>(
    api: &A,
    host_uri: &str,
    database: &str,
    contact: &str,
    comment: &str,
) -> Result<()> {
    let spec = match SubmissionSpec::build(host_uri, database, contact, comment) {
        Ok(spec) => spec,
        Err(errors) => {
            for error in &errors {
                console_error!("Invalid submission: {}", error);
                eprintln!("{error}");
            }
            bail!("submission rejected ({} invalid fields)", errors.len());
        }
    };
    let token = api.submit(&spec).await?;
    console_info!("Submitted handover {} for {}", token, spec.src_uri);
    println!("{token}");
    Ok(())
}
