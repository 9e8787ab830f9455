//! Data points, datasets and their running bounds.

/// A single point in logical data space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// X coordinate (usually, but not necessarily, an integral index)
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl DataPoint {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Min/max extent of a set of points in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl DataBounds {
    /// Bounds covering exactly one point.
    pub fn from_point(point: DataPoint) -> Self {
        Self {
            min_x: point.x,
            max_x: point.x,
            min_y: point.y,
            max_y: point.y,
        }
    }

    /// Compute bounds of a point slice. `None` for an empty slice.
    pub fn from_points(points: &[DataPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::from_point(*first);
        for p in rest {
            bounds.include(*p);
        }
        Some(bounds)
    }

    /// Grow to include `point`.
    #[inline]
    pub fn include(&mut self, point: DataPoint) {
        self.min_x = self.min_x.min(point.x);
        self.max_x = self.max_x.max(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_y = self.max_y.max(point.y);
    }

    /// Grow to include another bounds. Never shrinks.
    pub fn union(&mut self, other: &DataBounds) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True if `point` lies on any of the four edges.
    fn touches(&self, point: DataPoint) -> bool {
        point.x == self.min_x
            || point.x == self.max_x
            || point.y == self.min_y
            || point.y == self.max_y
    }
}

/// An ordered sequence of points (insertion order is draw order) with
/// incrementally maintained bounds.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    points: Vec<DataPoint>,
    bounds: Option<DataBounds>,
}

impl DataSet {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from points, computing its bounds.
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let bounds = DataBounds::from_points(&points);
        Self { points, bounds }
    }

    /// Create a dataset from tuples.
    pub fn from_tuples<T: Into<DataPoint> + Copy>(data: &[T]) -> Self {
        Self::from_points(data.iter().map(|&d| d.into()).collect())
    }

    /// Append a point and extend the bounds.
    pub fn add_point(&mut self, point: DataPoint) {
        self.points.push(point);
        match &mut self.bounds {
            Some(bounds) => bounds.include(point),
            None => self.bounds = Some(DataBounds::from_point(point)),
        }
    }

    /// Remove the first point equal to `point`.
    ///
    /// Returns `false` if no such point exists. When the removed point sat on
    /// an edge of the bounds they are rebuilt by a full scan.
    pub fn remove_point(&mut self, point: &DataPoint) -> bool {
        let Some(index) = self.points.iter().position(|p| p == point) else {
            return false;
        };
        let removed = self.points.remove(index);

        if self.bounds.is_some_and(|b| b.touches(removed)) {
            self.bounds = DataBounds::from_points(&self.points);
        }
        true
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Bounds of the current points, `None` when empty.
    pub fn bounds(&self) -> Option<DataBounds> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Horizontal extent of the data, zero when empty.
    pub fn level_width(&self) -> f64 {
        self.bounds.map_or(0.0, |b| b.width())
    }

    /// Vertical extent of the data, zero when empty.
    pub fn level_height(&self) -> f64 {
        self.bounds.map_or(0.0, |b| b.height())
    }
}

impl FromIterator<DataPoint> for DataSet {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}
