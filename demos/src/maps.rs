//! Map files.
//!
//! `.json` files hold [`MapData`]; anything else is read as text art
//! (`.`, `#`, `S`, `E`), which carries its own size.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;
use stepgrid_core::{Grid, MapData};

/// Default map size, in cells.
pub const DEFAULT_SIZE: (i32, i32) = (32, 18);

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a map. `size` is used for JSON maps, which store no dimensions.
pub fn load_map(path: &Path, size: (i32, i32)) -> Result<Grid> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read map {}", path.display()))?;
    let grid = if is_json(path) {
        let data: MapData = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a valid map file", path.display()))?;
        Grid::from_map_data(size.0, size.1, &data)?
    } else {
        Grid::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?
    };
    info!(
        "loaded {} ({}x{}, {} obstacles)",
        path.display(),
        grid.dimensions().0,
        grid.dimensions().1,
        grid.obstacle_count()
    );
    Ok(grid)
}

/// Serialize a grid as pretty JSON map data or as text art.
pub fn encode_map(grid: &Grid, json: bool) -> Result<String> {
    if json {
        let mut s = serde_json::to_string_pretty(&grid.to_map_data())?;
        s.push('\n');
        Ok(s)
    } else {
        Ok(grid.to_string())
    }
}

/// Write a map to `path`.
pub fn save_map(path: &Path, grid: &Grid) -> Result<()> {
    let text = encode_map(grid, is_json(path))?;
    fs::write(path, text).with_context(|| format!("failed to write map {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(())
}

/// Parse `COLSxROWS`.
pub fn parse_size(s: &str) -> Result<(i32, i32)> {
    let Some((c, r)) = s.split_once(['x', 'X']) else {
        bail!("expected COLSxROWS, got {s:?}");
    };
    let cols: i32 = c.trim().parse().with_context(|| format!("bad column count {c:?}"))?;
    let rows: i32 = r.trim().parse().with_context(|| format!("bad row count {r:?}"))?;
    if cols <= 0 || rows <= 0 {
        bail!("map size must be positive, got {cols}x{rows}");
    }
    Ok((cols, rows))
}
