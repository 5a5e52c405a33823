/// Returns the `(columns, rows)` grid used to lay out `count` equally sized cells.
///
/// Grids are never more than twice as wide as they are tall. Within that limit a grid with no
/// unused cells is returned as soon as one is found; otherwise the grid wasting the fewest cells
/// wins, and the narrowest grid wins a tie.
///
/// ```
/// use glyph_pack::grid_size;
///
/// assert_eq!(grid_size(94), (12, 8));
/// assert_eq!(grid_size(5), (3, 2));
/// ```
pub fn grid_size(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }

    // (columns, rows, wasted cells)
    let mut best = (count, 1, count);
    let mut columns = ceil_sqrt(count);

    loop {
        let rows = count.div_ceil(columns);
        if columns > rows * 2 {
            break;
        }

        let remainder = count % columns;
        if remainder == 0 {
            return (columns, rows);
        }

        let waste = columns - remainder;
        if waste < best.2 {
            best = (columns, rows, waste);
        }

        columns += 1;
    }

    (best.0, best.1)
}

fn ceil_sqrt(val: usize) -> usize {
    let mut res = (val as f64).sqrt().ceil() as usize;

    // Float rounding may be off by one for very large values
    while res > 0 && (res - 1).saturating_mul(res - 1) >= val {
        res -= 1;
    }

    while res.saturating_mul(res) < val {
        res += 1;
    }

    res
}
