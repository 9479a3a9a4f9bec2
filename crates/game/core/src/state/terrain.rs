use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dungeon features occupying a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    #[default]
    RockWall,
    StoneWall,
    Floor,
    ShallowWater,
    StairsDown,
    StairsUp,
    AltarZin,
    AltarShiningOne,
    AltarTrog,
    AltarJiyva,
}

impl Feature {
    pub const fn is_altar(self) -> bool {
        matches!(
            self,
            Feature::AltarZin | Feature::AltarShiningOne | Feature::AltarTrog | Feature::AltarJiyva
        )
    }
}

/// Row-major feature grid of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    cells: Vec<Feature>,
}

impl TerrainGrid {
    /// Creates a grid filled with `fill`.
    pub fn new(width: i32, height: i32, fill: Feature) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; cell_count(width, height)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get(&self, pos: Position) -> Option<Feature> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Writes a feature; returns false when `pos` lies outside the grid.
    pub fn set(&mut self, pos: Position, feature: Feature) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = feature;
                true
            }
            None => false,
        }
    }

    /// Every position at least `border` cells away from the map edge.
    pub fn rectangle(&self, border: i32) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (border..height - border)
            .flat_map(move |y| (border..width - border).map(move |x| Position::new(x, y)))
    }

    pub fn count(&self, feature: Feature) -> usize {
        self.cells.iter().filter(|cell| **cell == feature).count()
    }
}

/// Number of cells of a `width` by `height` grid; both are non-negative.
fn cell_count(width: i32, height: i32) -> usize {
    width as usize * height as usize
}
