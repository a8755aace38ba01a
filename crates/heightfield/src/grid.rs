/// A rectangular grid of altitudes, stored row-major: the cell at `(x, y)`
/// lives at index `y * width + x`.
#[derive(Debug, Clone)]
pub struct Heightfield {
    width: usize,
    height: usize,
    cells: Vec<f32>,
}

impl Heightfield {
    /// Create a field of the given size with every cell at altitude 0.
    pub fn new(width: usize, height: usize) -> Heightfield {
        Heightfield {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    /// Build a field from existing row-major cells.
    ///
    /// Panics when `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<f32>) -> Heightfield {
        assert_eq!(
            cells.len(),
            width * height,
            "cell count must match {width}x{height}"
        );
        Heightfield {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Altitude at `(x, y)`. Panics when the coordinate is outside the field.
    pub fn altitude(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        self.cells[y * self.width + x]
    }

    /// Altitude at `(x, y)`, or `None` outside the field.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set one cell. Panics when the coordinate is outside the field.
    pub fn set_altitude(&mut self, x: usize, y: usize, altitude: f32) {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} field",
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = altitude;
    }

    /// Set every cell to the same altitude.
    pub fn fill(&mut self, altitude: f32) {
        self.cells.fill(altitude);
    }

    /// Add `delta` to every cell of a rectangle. The rectangle is clamped to
    /// the field, so a brush reaching past an edge only touches what exists.
    pub fn raise_rect(&mut self, x: usize, y: usize, width: usize, height: usize, delta: f32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(self.height)..y_end {
            for col in x.min(self.width)..x_end {
                self.cells[row * self.width + col] += delta;
            }
        }
    }

    /// Minimum and maximum altitude over all cells, `None` for an empty field.
    pub fn altitude_bounds(&self) -> Option<(f32, f32)> {
        if self.cells.is_empty() {
            return None;
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &altitude in &self.cells {
            min = min.min(altitude);
            max = max.max(altitude);
        }
        Some((min, max))
    }

    /// Row-major view of the backing cells.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }
}
