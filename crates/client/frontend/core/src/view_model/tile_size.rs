//! Pixel size of one map tile.

/// Largest tile, used for grids up to [`SMALL_GRID`] wide.
pub const MAX_TILE_SIZE: u32 = 20;
/// Smallest tile, used for grids wider than [`LARGE_GRID`].
pub const MIN_TILE_SIZE: u32 = 5;

const SMALL_GRID: u64 = 30;
const LARGE_GRID: u64 = 100;

/// Chooses the tile size for a `width` x `height` grid.
///
/// Returns `None` for degenerate grids, which render nothing. Otherwise the
/// result lies in `[MIN_TILE_SIZE, MAX_TILE_SIZE]` and does not grow with the
/// grid. When `max_pixel_width` is given and the scaled grid would exceed it,
/// the tile shrinks to `max_pixel_width / width` (rounded down), which may fall
/// below the minimum.
pub fn plan_tile_size(width: usize, height: usize, max_pixel_width: Option<u32>) -> Option<u32> {
    if width == 0 || height == 0 {
        return None;
    }

    let width = width as u64;
    let height = height as u64;

    // Tall grids are sized as if they were 1.5x as wide as they are.
    let metric = if 2 * height > 3 * width {
        (3 * width).div_ceil(2)
    } else {
        width
    };

    let mut tile_size = scale(metric);

    if let Some(max_pixel_width) = max_pixel_width {
        if width * u64::from(tile_size) > u64::from(max_pixel_width) {
            tile_size = u32::try_from(u64::from(max_pixel_width) / width).unwrap_or(0);
        }
    }

    Some(tile_size)
}

fn scale(metric: u64) -> u32 {
    if metric <= SMALL_GRID {
        return MAX_TILE_SIZE;
    }
    if metric > LARGE_GRID {
        return MIN_TILE_SIZE;
    }

    let span = u64::from(MAX_TILE_SIZE - MIN_TILE_SIZE);
    let shrink = (span * (metric - SMALL_GRID)).div_ceil(LARGE_GRID - SMALL_GRID);
    // shrink <= span, so this never underflows.
    MAX_TILE_SIZE - shrink as u32
}
