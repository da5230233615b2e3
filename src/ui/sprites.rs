//! Pixel art for the terminal surface.
//!
//! Each bitmap is a list of equal-width rows. A character selects a palette
//! color; `.` is transparent. Bitmaps are stretched to the requested size
//! with nearest-neighbor sampling, so proportions matter more than size.

use crate::entities::obstacles::Species;
use crate::render::{Rgb, RunnerPose, Sprite};

pub struct Bitmap {
    pub rows: &'static [&'static str],
}

impl Bitmap {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Color at a bitmap coordinate, `None` for transparent or out of range.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        let row = self.rows.get(y)?;
        palette(*row.as_bytes().get(x)?)
    }
}

fn palette(code: u8) -> Option<Rgb> {
    match code {
        b'#' => Some(Rgb(0xc8, 0xc8, 0xc0)),
        b'o' => Some(Rgb(0x20, 0x20, 0x20)),
        b'g' => Some(Rgb(0x4c, 0xa0, 0x4c)),
        b'G' => Some(Rgb(0x2e, 0x70, 0x34)),
        b'b' => Some(Rgb(0x9c, 0x6c, 0xb0)),
        b'h' => Some(Rgb(0xb0, 0x80, 0x50)),
        b'y' => Some(Rgb(0xe0, 0xc0, 0x40)),
        b'd' => Some(Rgb(0x8a, 0x70, 0x52)),
        b'p' => Some(Rgb(0x5e, 0x4c, 0x3a)),
        _ => None,
    }
}

const RUNNER_STANDING: Bitmap = Bitmap {
    rows: &[
        "..........########..",
        ".........##o#######.",
        ".........##########.",
        ".........##########.",
        ".........#####......",
        ".........########...",
        "#.......######......",
        "#......#######......",
        "##...##########.....",
        "###.#########.#.....",
        "#############.......",
        ".###########........",
        "..#########.........",
        "...#######..........",
        "....###.##..........",
        "....##...#..........",
        "....#....#..........",
        "....##...##.........",
    ],
};

const RUNNER_STRIDE_LEFT: Bitmap = Bitmap {
    rows: &[
        "..........########..",
        ".........##o#######.",
        ".........##########.",
        ".........##########.",
        ".........#####......",
        ".........########...",
        "#.......######......",
        "#......#######......",
        "##...##########.....",
        "###.#########.#.....",
        "#############.......",
        ".###########........",
        "..#########.........",
        "...#######..........",
        "....###.##..........",
        "....##...##.........",
        "....#...............",
        "....##..............",
    ],
};

const RUNNER_STRIDE_RIGHT: Bitmap = Bitmap {
    rows: &[
        "..........########..",
        ".........##o#######.",
        ".........##########.",
        ".........##########.",
        ".........#####......",
        ".........########...",
        "#.......######......",
        "#......#######......",
        "##...##########.....",
        "###.#########.#.....",
        "#############.......",
        ".###########........",
        "..#########.........",
        "...#######..........",
        "....###.##..........",
        "....###..#..........",
        ".........#..........",
        ".........##.........",
    ],
};

const TALL_CACTUS: Bitmap = Bitmap {
    rows: &[
        "....gg....",
        "...gggg...",
        "...gGgg...",
        "...gGgg...",
        "g..gGgg...",
        "gg.gGgg..g",
        "gg.gGgg.gg",
        "gg.gGgg.gg",
        "gggGGgg.gg",
        ".ggGGggggg",
        "...gGggggg",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
        "...gGgg...",
    ],
};

const CACTUS_CLUSTER: Bitmap = Bitmap {
    rows: &[
        "....gg..............",
        "...gggg......gg.....",
        "...gGgg.....gggg....",
        "g..gGgg.....gGgg....",
        "gg.gGgg..g..gGgg..g.",
        "gg.gGgg.gg..gGgg.gg.",
        "gg.gGgg.gg.ggGgg.gg.",
        "gggGGgg.gg.ggGgggggg",
        ".ggGGgggggg.gGggggg.",
        "...gGggggg..gGgg....",
        "...gGgg.....gGgg....",
        "...gGgg..gg.gGgg....",
        "...gGgg.gggggGgg....",
        "...gGgg.gGggggGg....",
        "...gGgg.gGgg.gGgg...",
        "...gGgg.gGgg.gGgg...",
        "...gGgg.gGgg.gGgg...",
        "...gGgg.gGgg.gGgg...",
        "...gGgg.gGgg.gGgg...",
        "...gGgg.gGgg.gGgg...",
    ],
};

const SHORT_CACTUS: Bitmap = Bitmap {
    rows: &[
        ".....gg.......",
        "....gggg......",
        "....gGgg...g..",
        "g...gGgg..gg..",
        "gg..gGgg..gg..",
        "gg..gGgg..gg..",
        "ggg.gGggggg...",
        ".gggGGgggg....",
        "....gGgg......",
        "....gGgg......",
        "....gGgg......",
        "....gGgg......",
        "....gGgg......",
        "....gGgg......",
    ],
};

const CROW_UP: Bitmap = Bitmap {
    rows: &[
        "......b.........",
        "......bb........",
        "......bbb.......",
        "...bb.bbbb......",
        "..bobbbbbb......",
        "yybbbbbbbbbbbbb.",
        "....bbbbbbbbb...",
        "......bbbbbbbbb.",
        "................",
        "................",
    ],
};

const CROW_DOWN: Bitmap = Bitmap {
    rows: &[
        "................",
        "................",
        "................",
        "...bb...........",
        "..bobb..........",
        "yybbbbbbbbbbbbb.",
        "....bbbbbbbbb...",
        "......bbbbbbbbb.",
        "......bbbb......",
        "......bb........",
    ],
};

const HAWK_UP: Bitmap = Bitmap {
    rows: &[
        ".......hh...........",
        ".......hhh..........",
        ".......hhhh.........",
        ".......hhhhh........",
        "...hh..hhhhhh.......",
        "..hohhhhhhhhh.......",
        "yyhhhhhhhhhhhhhhhhh.",
        ".....hhhhhhhhhhh....",
        ".......hhhhhhhhhhhh.",
        "....................",
        "....................",
        "....................",
    ],
};

const HAWK_DOWN: Bitmap = Bitmap {
    rows: &[
        "....................",
        "....................",
        "....................",
        "....................",
        "...hh...............",
        "..hohh..............",
        "yyhhhhhhhhhhhhhhhhh.",
        ".....hhhhhhhhhhh....",
        ".......hhhhhhhhhhhh.",
        ".......hhhhh........",
        ".......hhhh.........",
        ".......hh...........",
    ],
};

const GROUND: Bitmap = Bitmap {
    rows: &[
        "dddddddddddddddddddddddddddddddddddddddddddddddd",
        "................................................",
        "..p.......pp.........p.........p.p.........p....",
        ".......p.............pp.....p..........pp.......",
        "...pp...........p...............p...........p...",
        "................................................",
    ],
};

/// The bitmap a sprite request resolves to.
pub fn bitmap(sprite: Sprite) -> &'static Bitmap {
    match sprite {
        Sprite::Runner(RunnerPose::Standing) => &RUNNER_STANDING,
        Sprite::Runner(RunnerPose::StrideLeft) => &RUNNER_STRIDE_LEFT,
        Sprite::Runner(RunnerPose::StrideRight) => &RUNNER_STRIDE_RIGHT,
        Sprite::Obstacle(Species::TallCactus, _) => &TALL_CACTUS,
        Sprite::Obstacle(Species::CactusCluster, _) => &CACTUS_CLUSTER,
        Sprite::Obstacle(Species::ShortCactus, _) => &SHORT_CACTUS,
        Sprite::Obstacle(Species::Crow, 0) => &CROW_UP,
        Sprite::Obstacle(Species::Crow, _) => &CROW_DOWN,
        Sprite::Obstacle(Species::Hawk, 0) => &HAWK_UP,
        Sprite::Obstacle(Species::Hawk, _) => &HAWK_DOWN,
        Sprite::Ground => &GROUND,
    }
}
