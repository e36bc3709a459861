//! ZCollide 演示程序入口
//!
//! 用法：`zcollide [CONFIG.json]`
//!
//! 读取碰撞配置（缺省时使用默认值），在网格中搭建一个小场景，
//! 执行几次射线检测并把命中结果写入日志。

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use zcollide_core::prelude::*;

/// 加载配置文件
fn load_config(path: Option<&Path>) -> Result<CollisionConfig> {
    let config: CollisionConfig = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => CollisionConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// 演示场景：一排圆、一排方块，外加一个不参与射线检测的点
fn build_scene(config: &CollisionConfig) -> Result<(Grid, ShapeId)> {
    let mut grid = Grid::from_config(config)?;

    let player = grid.insert(Shape::circle(Vector2::new(0.0, 0.0), 8.0));
    for i in 1..=4 {
        let x = i as f64 * 64.0;
        grid.insert(Shape::circle(Vector2::new(x, 0.0), 10.0));
        grid.insert(Shape::polygon(ConvexPolygon::rectangle(x - 12.0, 48.0, 24.0, 24.0)));
    }
    grid.insert(Shape::point(Vector2::new(32.0, 0.0)));

    info!("Created scene with {} shapes in {} cells", grid.len(), grid.cell_count());
    Ok((grid, player))
}

/// 从玩家位置发射一条射线，记录前 `max_hits` 个命中
fn cast(grid: &Grid, config: &CollisionConfig, player: ShapeId, end: Vector2, max_hits: usize) {
    let Some(start) = grid.get(player).map(|s| s.bounds().center()) else {
        warn!("Player shape {:?} not in grid", player);
        return;
    };

    let selection = grid.query_segment(start, end, config.cast_margin);
    let settings = LineTestSettings::new(start, end, &selection)
        .with_config(config)
        .excluding(player)
        .on_intersect(|set, index, total| {
            let kind = grid
                .get(set.other_shape)
                .map_or("?", |s| s.geometry.type_name());
            info!(
                "  hit {}/{}: {} {:?} at ({:.2}, {:.2}), mtv ({:.2}, {:.2})",
                index + 1,
                total,
                kind,
                set.other_shape,
                set.intersections[0].point.x,
                set.intersections[0].point.y,
                set.mtv.x,
                set.mtv.y,
            );
            index + 1 < max_hits
        });

    info!(
        "Cast ({:.1}, {:.1}) -> ({:.1}, {:.1}) over {} candidates",
        start.x,
        start.y,
        end.x,
        end.y,
        selection.len()
    );
    if !line_test(settings) {
        info!("  no hits");
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    info!("Starting ZCollide...");

    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    info!(
        "Config: cell {}x{}, cast margin {}",
        config.cell_width, config.cell_height, config.cast_margin
    );

    let (grid, player) = build_scene(&config)?;

    cast(&grid, &config, player, Vector2::new(300.0, 0.0), usize::MAX);
    cast(&grid, &config, player, Vector2::new(300.0, 0.0), 1);
    cast(&grid, &config, player, Vector2::new(200.0, 100.0), usize::MAX);
    cast(&grid, &config, player, Vector2::new(0.0, -200.0), usize::MAX);

    Ok(())
}
