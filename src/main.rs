use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use trip_planner::{cli, config, display, export, interactive, plan_file, session};
use trip_planner::error::PlannerError;
use trip_planner_common::{ActivityType, DayBucketId, ItineraryItem, TripData, UpsertOutcome};
use cli::{Cli, Commands};
use config::Config;
use plan_file::PlanFile;
use session::PlanningSession;

fn setup_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_session(path: &Path) -> Result<PlanningSession> {
    let plan = PlanFile::load(path)
        .with_context(|| format!("プランファイルを読み込めません: {}", path.display()))?;
    Ok(plan.into_session()?)
}

fn save_session(session: &PlanningSession, path: &Path) -> Result<()> {
    PlanFile::from_session(session)?
        .save(path)
        .with_context(|| format!("プランファイルを保存できません: {}", path.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗")?;

    info!("trip-planner starting");

    match cli.command {
        Commands::Plan { destinations, start, end, budget, currency, flights, output, generator, no_edit } => {
            println!("🧭 trip-planner - 旅行プラン作成\n");

            // 1. 旅行条件
            let trip = match (destinations.is_empty(), start) {
                (false, Some(start)) => {
                    let start = interactive::parse_date(&start)?;
                    let end = match end {
                        Some(end) => interactive::parse_date(&end)?,
                        None => start,
                    };
                    TripData::new(
                        destinations,
                        start,
                        end,
                        flights,
                        budget.unwrap_or(config.default_budget),
                        &currency.unwrap_or_else(|| config.currency()),
                    )?
                }
                _ => {
                    println!("[1/3] 旅行条件を入力してください");
                    interactive::prompt_trip(&config)?
                }
            };
            println!("✔ {}\n", display::format_trip_header(&trip));

            // 2. 旅程生成
            println!("[2/3] 旅程を生成中... ({})", generator.name());
            let mut session = PlanningSession::with_generator(generator);
            match interactive::generate_with_progress(&mut session, trip, config.generation_delay()).await {
                Ok(count) => println!("✔ {}件の旅程を生成\n", count),
                Err(PlannerError::GenerationCancelled) => {
                    println!("旅程の生成を中止しました");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }

            // 3. 保存
            println!("[3/3] プランを保存中...");
            save_session(&session, &output)?;
            println!("✔ プランを保存: {}\n", output.display());

            display::print_itinerary(&session);

            if !no_edit {
                interactive::run_edit_menu(&mut session, &config, &output).await?;
            }

            println!("\n✅ 完了");
        }

        Commands::Show { plan } => {
            let session = load_session(&plan)?;
            display::print_itinerary(&session);
        }

        Commands::Add { plan, id, day, time, activity, location, cost, kind } => {
            let mut session = load_session(&plan)?;

            if !cost.is_finite() || cost < 0.0 {
                anyhow::bail!("費用が不正です: {}", cost);
            }

            let kind = ActivityType::from(kind);
            if !kind.is_known() {
                log::warn!("未知の種別です（既定の表示になります）: {}", kind);
            }

            let item = ItineraryItem {
                id: id.unwrap_or_else(|| session.next_item_id()),
                day,
                time: interactive::parse_time(&time)?,
                activity,
                location,
                estimated_cost: cost,
                kind,
            };
            let item_id = item.id.clone();

            match session.upsert_item(item)? {
                UpsertOutcome::Added => println!("✔ 旅程を追加しました: id={}", item_id),
                UpsertOutcome::Updated => println!("✔ 旅程を更新しました: id={}", item_id),
            }
            save_session(&session, &plan)?;
        }

        Commands::Move { plan, item, to } => {
            let mut session = load_session(&plan)?;
            let destination: DayBucketId = to.parse().map_err(anyhow::Error::msg)?;

            if session.move_to_day(&item, destination.day())? {
                save_session(&session, &plan)?;
                println!("✔ id={} を {}日目へ移動しました", item, destination.day());
            } else {
                println!("変更はありません（すでに{}日目です）", destination.day());
            }
        }

        Commands::Export { plan, format, output } => {
            println!("📄 trip-planner - 旅程表出力\n");

            let session = load_session(&plan)?;
            let trip = session.trip().ok_or(PlannerError::NoTrip)?;
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            export::export_plan(trip, session.itinerary(), &format, &output_dir)?;

            println!("\n✅ 出力完了");
        }

        Commands::Config { currency, budget, delay_ms, output_dir, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(currency) = currency {
                config.set_currency(&currency)?;
                println!("✔ 既定の通貨を設定しました: {}", config.default_currency);
                changed = true;
            }
            if let Some(budget) = budget {
                config.set_budget(budget)?;
                println!("✔ 既定の予算を設定しました: {}", budget);
                changed = true;
            }
            if let Some(delay_ms) = delay_ms {
                config.generation_delay_ms = delay_ms;
                println!("✔ 生成の待ち時間を設定しました: {}ms", delay_ms);
                changed = true;
            }
            if let Some(dir) = output_dir {
                println!("✔ 出力ディレクトリを設定しました: {}", dir.display());
                config.output_dir = Some(dir);
                changed = true;
            }
            if changed {
                config.save().context("設定の保存に失敗")?;
            }

            if show || !changed {
                println!("設定:");
                println!("  通貨: {}", config.currency());
                println!("  予算: {}", config.default_budget);
                println!("  生成待ち時間: {}ms", config.generation_delay_ms);
                println!(
                    "  出力先: {}",
                    config.output_dir.as_ref().map_or_else(|| ".".to_string(), |d| d.display().to_string())
                );
            }
        }
    }

    Ok(())
}
