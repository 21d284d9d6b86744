//! Synthetic corner-point grid generators.
//!
//! These generators create predictable, verifiable grids that can be used
//! across the test suite. Every grid is returned as flat ZCORN and COORD
//! vectors in row-major order:
//!
//! - ZCORN: `(nz, 2, ny, 2, nx, 2)` indexed `[k, surface, j, row-side, i, col-side]`
//! - COORD: `(ny + 1, nx + 1, 2, 3)` indexed `[jp, ip, end, xyz]`
//!
//! Layer `k` takes its top from interface `k` and its bottom from interface
//! `k + 1`, so neighbouring layers always share corner depths.

/// A generated grid in flat form.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticGrid {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub zcorn: Vec<f64>,
    pub coord: Vec<f64>,
}

impl SyntheticGrid {
    /// Flat ZCORN index of a corner.
    ///
    /// `cs`/`rs` select the east/north side of cell (i, j) and `surface` is
    /// 0 for top, 1 for bottom.
    pub fn zcorn_index(&self, i: usize, j: usize, k: usize, cs: usize, rs: usize, surface: usize) -> usize {
        ((((k * 2 + surface) * self.ny + j) * 2 + rs) * self.nx + i) * 2 + cs
    }

    /// Depth of a single corner.
    pub fn corner(&self, i: usize, j: usize, k: usize, cs: usize, rs: usize, surface: usize) -> f64 {
        self.zcorn[self.zcorn_index(i, j, k, cs, rs, surface)]
    }

    /// Flat COORD index of the first component of a pillar endpoint.
    pub fn coord_index(&self, ip: usize, jp: usize, end: usize) -> usize {
        ((jp * (self.nx + 1) + ip) * 2 + end) * 3
    }
}

/// Build a grid from an interface depth function and a pillar function.
///
/// `interface(ip, jp, level)` gives the depth of interface `level`
/// (0..=nz) on pillar (ip, jp). `pillar(ip, jp)` gives the pillar as
/// `[x1, y1, z1, x2, y2, z2]`.
pub fn build_grid<I, P>(nx: usize, ny: usize, nz: usize, interface: I, pillar: P) -> SyntheticGrid
where
    I: Fn(usize, usize, usize) -> f64,
    P: Fn(usize, usize) -> [f64; 6],
{
    let mut zcorn = Vec::with_capacity(nz * 2 * ny * 2 * nx * 2);
    for k in 0..nz {
        for surface in 0..2 {
            for j in 0..ny {
                for rs in 0..2 {
                    for i in 0..nx {
                        for cs in 0..2 {
                            zcorn.push(interface(i + cs, j + rs, k + surface));
                        }
                    }
                }
            }
        }
    }

    let mut coord = Vec::with_capacity((ny + 1) * (nx + 1) * 6);
    for jp in 0..=ny {
        for ip in 0..=nx {
            coord.extend_from_slice(&pillar(ip, jp));
        }
    }

    SyntheticGrid {
        nx,
        ny,
        nz,
        zcorn,
        coord,
    }
}

/// Creates a flat-layered grid on vertical pillars.
///
/// Layer `k` spans `top + k * thickness` to `top + (k + 1) * thickness`
/// everywhere. Pillar (ip, jp) stands at `(ip * spacing, jp * spacing)`.
///
/// # Example
///
/// ```
/// use test_utils::layered_grid;
///
/// let grid = layered_grid(2, 2, 3, 100.0, 0.0, 10.0);
/// assert_eq!(grid.zcorn.len(), 3 * 2 * 2 * 2 * 2 * 2);
/// assert_eq!(grid.corner(1, 1, 1, 0, 0, 0), 10.0); // layer 1 top
/// assert_eq!(grid.corner(1, 1, 1, 0, 0, 1), 20.0); // layer 1 bottom
/// assert_eq!(grid.coord[grid.coord_index(2, 1, 0)], 200.0);
/// ```
pub fn layered_grid(
    nx: usize,
    ny: usize,
    nz: usize,
    spacing: f64,
    top: f64,
    thickness: f64,
) -> SyntheticGrid {
    let bottom = top + nz as f64 * thickness;
    build_grid(
        nx,
        ny,
        nz,
        |_, _, level| top + level as f64 * thickness,
        |ip, jp| {
            let (x, y) = (ip as f64 * spacing, jp as f64 * spacing);
            [x, y, top, x, y, bottom]
        },
    )
}

/// Creates a 10 m layered grid whose pillars all lean east by `lean`.
///
/// Pillar tops sit at depth 0 and bottoms at `nz * 10`; the bottom end is
/// shifted by `lean` in x.
pub fn slanted_grid(nx: usize, ny: usize, nz: usize, spacing: f64, lean: f64) -> SyntheticGrid {
    let bottom = nz as f64 * 10.0;
    build_grid(
        nx,
        ny,
        nz,
        |_, _, level| level as f64 * 10.0,
        |ip, jp| {
            let (x, y) = (ip as f64 * spacing, jp as f64 * spacing);
            [x, y, 0.0, x + lean, y, bottom]
        },
    )
}

/// Creates a folded grid: 10 m layers starting at 1000 m, displaced per
/// pillar by `amplitude * sin(0.7 ip) * cos(0.5 jp)`.
///
/// Every interface on a pillar moves by the same amount, so each layer
/// keeps its 10 m thickness.
pub fn undulating_grid(nx: usize, ny: usize, nz: usize, amplitude: f64) -> SyntheticGrid {
    let shift = move |ip: usize, jp: usize| amplitude * (0.7 * ip as f64).sin() * (0.5 * jp as f64).cos();
    build_grid(
        nx,
        ny,
        nz,
        move |ip, jp, level| 1000.0 + level as f64 * 10.0 + shift(ip, jp),
        move |ip, jp| {
            let (x, y) = (ip as f64 * 100.0, jp as f64 * 100.0);
            [x, y, 900.0, x, y, 1100.0 + nz as f64 * 10.0]
        },
    )
}

/// Creates a grid with deterministic per-interface noise.
///
/// Interfaces are 10 m apart starting at 1000 m with up to ±4 m of jitter,
/// so layers stay ordered but thicknesses vary from corner to corner.
pub fn jittered_grid(nx: usize, ny: usize, nz: usize, seed: u32) -> SyntheticGrid {
    build_grid(
        nx,
        ny,
        nz,
        move |ip, jp, level| {
            let hash = simple_hash(ip as u32, jp as u32 * 1009 + level as u32, seed);
            let jitter = (hash % 8001) as f64 / 1000.0 - 4.0;
            1000.0 + level as f64 * 10.0 + jitter
        },
        move |ip, jp| {
            let (x, y) = (ip as f64 * 50.0, jp as f64 * 50.0);
            [x, y, 900.0, x, y, 1100.0 + nz as f64 * 10.0]
        },
    )
}

/// Per-pillar depths, shape `(ny + 1, nx + 1)` in row-major order.
///
/// # Example
///
/// ```
/// use test_utils::pillar_depths;
///
/// let depths = pillar_depths(2, 1, |ip, jp| (ip + 10 * jp) as f64);
/// assert_eq!(depths, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
/// ```
pub fn pillar_depths<F>(nx: usize, ny: usize, depth: F) -> Vec<f64>
where
    F: Fn(usize, usize) -> f64,
{
    let mut data = Vec::with_capacity((nx + 1) * (ny + 1));
    for jp in 0..=ny {
        for ip in 0..=nx {
            data.push(depth(ip, jp));
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
