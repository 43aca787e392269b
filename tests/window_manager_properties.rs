use webtop::{
    grid_dimensions, AppKind, Rect, ScreenGeometry, TileMode, WindowId, WindowManager,
};

const SOAK_RUNS: u64 = 40;
const OPS_PER_RUN: usize = 120;

fn screen() -> ScreenGeometry {
    ScreenGeometry::new(1600.0, 948.0, 48.0)
}

/// Small xorshift generator so every run replays the same op sequence.
struct OpRng(u64);

impl OpRng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

fn pick_id(wm: &WindowManager, rng: &mut OpRng) -> Option<WindowId> {
    if wm.is_empty() {
        return None;
    }
    let index = rng.below(wm.len());
    Some(wm.windows()[index].id.clone())
}

fn apply_random_op(wm: &mut WindowManager, rng: &mut OpRng) {
    match rng.below(9) {
        0 | 1 => {
            let kind = AppKind::ALL[rng.below(AppKind::ALL.len())];
            wm.launch(kind);
        }
        2 => {
            if let Some(id) = pick_id(wm, rng) {
                wm.close(&id);
            }
        }
        3 => {
            if let Some(id) = pick_id(wm, rng) {
                wm.minimize(&id);
            }
        }
        4 => {
            if let Some(id) = pick_id(wm, rng) {
                wm.maximize(&id);
            }
        }
        5 | 6 => {
            if let Some(id) = pick_id(wm, rng) {
                wm.focus(&id);
            }
        }
        7 => {
            let mode = [TileMode::Horizontal, TileMode::Vertical, TileMode::Grid][rng.below(3)];
            wm.tile(mode);
        }
        _ => wm.cascade(),
    }
}

fn assert_store_invariants(wm: &WindowManager) {
    for kind in AppKind::ALL {
        let count = wm
            .windows()
            .iter()
            .filter(|window| window.app_kind == kind)
            .count();
        if !kind.is_multi_instance() {
            assert!(count <= 1, "{kind} has {count} windows");
        }
    }

    let mut z_indices: Vec<u32> = wm.windows().iter().map(|window| window.z_index).collect();
    z_indices.sort_unstable();
    z_indices.dedup();
    assert_eq!(z_indices.len(), wm.len(), "z-indices must be unique");

    if let Some(active) = wm.active_window() {
        assert!(active.is_open);
        assert!(!active.is_minimized, "active window {} is minimized", active.id);
    } else {
        assert!(wm.active_window_id().is_none(), "active id must reference a window");
    }
}

#[test]
fn random_op_sequences_preserve_store_invariants() {
    for seed in 1..=SOAK_RUNS {
        let mut wm = WindowManager::new(screen());
        let mut rng = OpRng(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
        for _ in 0..OPS_PER_RUN {
            apply_random_op(&mut wm, &mut rng);
            assert_store_invariants(&wm);
        }
    }
}

#[test]
fn repeated_open_of_single_instance_kind_reuses_window() {
    let mut wm = WindowManager::new(screen());
    let first = wm.open(AppKind::Settings, "Settings");
    wm.launch(AppKind::Terminal);

    for _ in 0..5 {
        assert_eq!(wm.open(AppKind::Settings, "Settings"), first);
    }

    let settings = wm
        .windows()
        .iter()
        .filter(|window| window.app_kind == AppKind::Settings)
        .count();
    assert_eq!(settings, 1);
    assert_eq!(wm.active_window_id(), Some(&first));
}

#[test]
fn multi_instance_kinds_open_new_windows() {
    let mut wm = WindowManager::new(screen());
    let a = wm.launch(AppKind::Terminal);
    let b = wm.launch(AppKind::Terminal);
    let c = wm.launch(AppKind::ChatAgent);
    let d = wm.launch(AppKind::ChatAgent);

    assert_eq!(wm.len(), 4);
    assert_ne!(a, b);
    assert_ne!(c, d);
}

#[test]
fn most_recently_focused_window_holds_greatest_z_index() {
    let mut wm = WindowManager::new(screen());
    let ids: Vec<WindowId> = [AppKind::Files, AppKind::Docs, AppKind::Monitor, AppKind::Terminal]
        .into_iter()
        .map(|kind| wm.launch(kind))
        .collect();
    let mut rng = OpRng(0x5EED);

    for _ in 0..50 {
        let target = &ids[rng.below(ids.len())];
        wm.focus(target);

        let top = wm
            .windows()
            .iter()
            .max_by_key(|window| window.z_index)
            .expect("windows exist");
        assert_eq!(&top.id, target);
        assert_eq!(wm.active_window_id(), Some(target));
        assert!(!top.is_minimized);
    }
}

#[test]
fn focus_restores_minimized_window() {
    let mut wm = WindowManager::new(screen());
    let id = wm.launch(AppKind::Docs);
    wm.minimize(&id);
    assert_eq!(wm.active_window_id(), None);

    wm.focus(&id);
    assert!(!wm.window(&id).expect("docs").is_minimized);
    assert_eq!(wm.active_window_id(), Some(&id));
}

#[test]
fn minimize_twice_restores_flag() {
    let mut wm = WindowManager::new(screen());
    let id = wm.launch(AppKind::Browser);
    let z_before = wm.window(&id).expect("browser").z_index;

    wm.minimize(&id);
    assert!(wm.window(&id).expect("browser").is_minimized);
    assert_eq!(wm.active_window_id(), None);

    wm.minimize(&id);
    let window = wm.window(&id).expect("browser");
    assert!(!window.is_minimized);
    assert_eq!(window.z_index, z_before);

    // Active state is re-derived by focusing the restored window.
    wm.focus(&id);
    assert_eq!(wm.active_window_id(), Some(&id));
}

#[test]
fn grid_tiling_assigns_disjoint_cells() {
    for count in 1..=10 {
        let mut wm = WindowManager::new(screen());
        for _ in 0..count {
            wm.launch(AppKind::Terminal);
        }
        wm.tile(TileMode::Grid);

        let (columns, rows) = grid_dimensions(count);
        assert_eq!(columns, (count as f64).sqrt().ceil() as usize);
        assert_eq!(rows, count.div_ceil(columns));

        let area = screen().work_area();
        let cell_width = area.width / columns as f64;
        let cell_height = area.height / rows as f64;
        let mut occupied = Vec::new();
        for window in wm.windows() {
            assert_eq!(window.size.width, cell_width);
            assert_eq!(window.size.height, cell_height);

            let column = (window.position.x / cell_width).round() as usize;
            let row = (window.position.y / cell_height).round() as usize;
            assert!(column < columns && row < rows, "{count} windows: cell out of grid");
            assert!(
                (window.position.x - column as f64 * cell_width).abs() < 1e-6
                    && (window.position.y - row as f64 * cell_height).abs() < 1e-6,
                "{count} windows: {:?} is not aligned to a cell",
                window.position
            );
            occupied.push((column, row));
        }
        occupied.sort_unstable();
        occupied.dedup();
        assert_eq!(occupied.len(), count, "{count} windows share a cell");

        let bounds: Vec<Rect> = wm.windows().iter().map(|window| window.bounds()).collect();
        for (index, rect) in bounds.iter().enumerate() {
            for other in &bounds[index + 1..] {
                assert!(
                    !rect.overlaps(other),
                    "{count} windows: {rect:?} overlaps {other:?}"
                );
            }
        }
    }
}

#[test]
fn tiling_skips_minimized_windows_and_clears_maximized() {
    let mut wm = WindowManager::new(screen());
    let left = wm.launch(AppKind::Files);
    let hidden = wm.launch(AppKind::Docs);
    let right = wm.launch(AppKind::Monitor);
    wm.maximize(&left);
    wm.minimize(&hidden);
    let hidden_before = wm.window(&hidden).expect("docs").clone();

    wm.tile(TileMode::Horizontal);

    let area = screen().work_area();
    let left = wm.window(&left).expect("files");
    let right = wm.window(&right).expect("monitor");
    assert!(!left.is_maximized);
    assert_eq!(left.bounds(), Rect::new(0.0, 0.0, area.width / 2.0, area.height));
    assert_eq!(
        right.bounds(),
        Rect::new(area.width / 2.0, 0.0, area.width / 2.0, area.height)
    );
    assert_eq!(wm.window(&hidden), Some(&hidden_before));
}

#[test]
fn vertical_tiling_stacks_full_width_rows() {
    let mut wm = WindowManager::new(screen());
    wm.launch(AppKind::Terminal);
    wm.launch(AppKind::Terminal);

    wm.tile(TileMode::Vertical);

    let area = screen().work_area();
    let rows: Vec<Rect> = wm.windows().iter().map(|window| window.bounds()).collect();
    assert_eq!(rows[0], Rect::new(0.0, 0.0, area.width, area.height / 2.0));
    assert_eq!(
        rows[1],
        Rect::new(0.0, area.height / 2.0, area.width, area.height / 2.0)
    );
}

#[test]
fn cascade_offsets_visible_windows_in_open_order() {
    let mut wm = WindowManager::new(screen());
    let first = wm.launch(AppKind::Terminal);
    let skipped = wm.launch(AppKind::Terminal);
    let third = wm.launch(AppKind::Terminal);
    wm.tile(TileMode::Grid);
    wm.maximize(&third);
    wm.minimize(&skipped);
    let skipped_before = wm.window(&skipped).expect("terminal").position;

    wm.cascade();

    let first = wm.window(&first).expect("first");
    let third = wm.window(&third).expect("third");
    assert_eq!((first.position.x, first.position.y), (50.0, 50.0));
    assert_eq!((third.position.x, third.position.y), (80.0, 80.0));
    assert!(!third.is_maximized);
    assert_eq!(wm.window(&skipped).expect("terminal").position, skipped_before);
}

#[test]
fn minimize_all_and_close_all_clear_active() {
    let mut wm = WindowManager::new(screen());
    wm.launch(AppKind::Files);
    wm.launch(AppKind::Terminal);

    wm.minimize_all();
    assert!(wm.windows().iter().all(|window| window.is_minimized));
    assert_eq!(wm.active_window_id(), None);
    assert!(wm.stacking_order().is_empty());

    wm.close_all();
    assert!(wm.is_empty());
    assert_eq!(wm.active_window_id(), None);
}

#[test]
fn tiling_follows_screen_resize() {
    let mut wm = WindowManager::new(screen());
    let id = wm.launch(AppKind::Files);
    wm.set_screen(ScreenGeometry::new(800.0, 648.0, 48.0));

    wm.tile(TileMode::Grid);

    assert_eq!(
        wm.window(&id).expect("files").bounds(),
        Rect::new(0.0, 0.0, 800.0, 600.0)
    );
}
