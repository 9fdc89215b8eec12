use anyhow::Context;
use clap::Parser;
use doha_guide::content::{self, Attraction};
use doha_guide::utils::logger;
use doha_guide::{CliConfig, FetchPhase, GuideView, Intent, ViewSnapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

const HELP: &str = "commands: next | prev | goto <n> | hover | leave | toggle <layover|multi-day> | currency <CODE> | help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌，JSON 模式下日誌也用 JSON
    if cli.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting doha-guide");

    let config = match cli.load_guide_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    if cli.verbose {
        tracing::debug!("Guide config: {:?}", config);
    }

    let chain = config
        .build_chain()
        .context("failed to set up exchange-rate providers")?;
    let attractions = content::attractions();
    let (view, handle) = GuideView::new(
        attractions.clone(),
        content::panel_ids(),
        chain,
        config.view_options()?,
    )?;

    let view_task = tokio::spawn(view.run());
    let target = config.rates.target_currency.to_ascii_uppercase();
    let render_task = tokio::spawn(render_loop(
        handle.subscribe(),
        attractions,
        target,
        cli.json,
    ));

    eprintln!("{}", HELP);
    eprintln!("currencies: {}", content::CURRENCY_CHOICES.join(", "));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                eprintln!("{}", HELP);
                continue;
            }
            _ => {}
        }

        match line.parse::<Intent>() {
            Ok(intent) => handle.send(intent)?,
            Err(e) => eprintln!("{}", e.user_friendly_message()),
        }
    }

    // 關閉最後一個 handle 後視圖結束並取消輪播計時器
    drop(handle);
    view_task.await.context("guide view stopped unexpectedly")?;
    render_task.await.context("renderer stopped unexpectedly")?;

    tracing::info!("doha-guide closed");
    Ok(())
}

async fn render_loop(
    mut snapshots: watch::Receiver<ViewSnapshot>,
    attractions: Vec<Attraction>,
    target: String,
    json: bool,
) {
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if json {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("failed to encode snapshot: {}", e),
            }
        } else {
            println!("{}", render_text(&snapshot, &attractions, &target));
        }

        if snapshots.changed().await.is_err() {
            break;
        }
    }
}

fn render_text(snapshot: &ViewSnapshot, attractions: &[Attraction], target: &str) -> String {
    let carousel = &snapshot.carousel;
    let title = attractions
        .get(carousel.current_index)
        .map(|a| a.title)
        .unwrap_or("?");
    let paused = if carousel.paused { " (paused)" } else { "" };

    let open = snapshot.accordion.open_id.as_deref().unwrap_or("none");

    let rates = &snapshot.rates;
    let rate_line = match rates.phase() {
        FetchPhase::Idle => format!("{}: -", rates.selection),
        FetchPhase::Loading => format!("{}: loading...", rates.selection),
        FetchPhase::Failed => format!(
            "{}: {}",
            rates.selection,
            rates.error_message.as_deref().unwrap_or_default()
        ),
        FetchPhase::Resolved => match &rates.result {
            Some(result) if result.as_of_label().is_empty() => {
                format!("1 {} = {:.4} {}", rates.selection, result.rate(), target)
            }
            Some(result) => format!(
                "1 {} = {:.4} {} (as of {})",
                rates.selection,
                result.rate(),
                target,
                result.as_of_label()
            ),
            None => format!("{}: -", rates.selection),
        },
    };

    format!(
        "[{}/{}] {}{} | open: {} | {}",
        carousel.current_index + 1,
        attractions.len(),
        title,
        paused,
        open,
        rate_line
    )
}
