// ==========================================
// War Room 工厂数据管线 - 命令行入口
// ==========================================
// 用法:
//   war-room-data extract <表格文件>
//   war-room-data integrate <表格文件> [数据目录]
//   war-room-data consolidate [数据目录]
//   war-room-data sync [数据目录]
//   war-room-data run <表格文件> [数据目录]
// ==========================================

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use war_room_data::config::{DataPaths, DEFAULT_DATA_DIR};
use war_room_data::error::PipelineResult;
use war_room_data::{logging, Pipeline};

fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", war_room_data::APP_NAME);
    tracing::info!("系统版本: {}", war_room_data::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  原因: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> PipelineResult<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Err(anyhow::anyhow!("缺少子命令").into());
    };

    match command.as_str() {
        "extract" => {
            let spreadsheet = required_path(args.get(1), "extract 需要表格文件路径")?;
            let pipeline = Pipeline::new(data_paths(args.get(2)));
            let rows = pipeline.extract(&spreadsheet)?;
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| anyhow::anyhow!("行记录序列化失败: {}", e))?;
            println!("{}", json);
            eprintln!("提取完成: 共 {} 行", rows.len());
        }
        "integrate" => {
            let spreadsheet = required_path(args.get(1), "integrate 需要表格文件路径")?;
            let pipeline = Pipeline::new(data_paths(args.get(2)));
            let report = pipeline.integrate(&spreadsheet)?;
            println!(
                "整合完成: 共 {} 行，跳过 {}，新增制造商 {}，新增工厂 {}",
                report.total_rows,
                report.skipped_rows,
                report.new_manufacturers,
                report.new_factories
            );
        }
        "consolidate" => {
            let pipeline = Pipeline::new(data_paths(args.get(1)));
            let report = pipeline.consolidate()?;
            println!(
                "合并完成: 富化 {} 条，补录 {} 条",
                report.enriched, report.appended
            );
        }
        "sync" => {
            let pipeline = Pipeline::new(data_paths(args.get(1)));
            let report = pipeline.sync()?;
            println!(
                "同步完成: 投影 {} 个工厂，新建子公司 {}，新建工厂 {}，坐标偏移 {}",
                report.synced,
                report.created_subsidiaries,
                report.created_factories,
                report.jittered
            );
            if !report.unmapped_manufacturers.is_empty() {
                println!(
                    "警告: 未登记子公司目录的制造商: {:?}",
                    report.unmapped_manufacturers
                );
            }
        }
        "run" => {
            let spreadsheet = required_path(args.get(1), "run 需要表格文件路径")?;
            let pipeline = Pipeline::new(data_paths(args.get(2)));
            let (integration, consolidation, sync) = pipeline.run_all(&spreadsheet)?;
            println!(
                "全流程完成: 整合 {} 行（新厂 {}），合并富化 {}，同步投影 {}",
                integration.total_rows,
                integration.new_factories,
                consolidation.enriched,
                sync.synced
            );
        }
        other => {
            print_usage();
            return Err(anyhow::anyhow!("未知子命令: {}", other).into());
        }
    }

    Ok(())
}

fn required_path(arg: Option<&String>, message: &str) -> PipelineResult<PathBuf> {
    arg.map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("{}", message).into())
}

fn data_paths(arg: Option<&String>) -> DataPaths {
    let dir = arg
        .map(|s| Path::new(s).to_path_buf())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    DataPaths::new(dir)
}

fn print_usage() {
    println!("用法: war-room-data <子命令> [参数]");
    println!();
    println!("子命令:");
    println!("  extract <表格文件>               解析表格并输出 JSON 行记录");
    println!("  integrate <表格文件> [数据目录]  整合表格到注册表与平面设施数据");
    println!("  consolidate [数据目录]           平面设施数据合并回注册表");
    println!("  sync [数据目录]                  注册表同步到地图展示文档");
    println!("  run <表格文件> [数据目录]        依次执行 integrate/consolidate/sync");
    println!();
    println!("默认数据目录: {}", DEFAULT_DATA_DIR);
}
