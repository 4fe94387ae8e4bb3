//! Height sample storage and continuous terrain queries.
//!
//! A [`HeightField`] owns a `width × height` grid of world-space heights
//! derived from a normalized heightmap image. It answers height and steepness
//! queries at arbitrary continuous coordinates via [`HeightField::sample`],
//! clamping anything outside the grid to the nearest boundary.

/// Result of a continuous height query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    /// Interpolated terrain height at the query point, in world units.
    pub height: f32,
    /// Slope angle toward the sampled neighbor, in radians.
    pub steepness: f32,
}

/// Immutable grid of terrain heights, centered at the world origin.
///
/// Heights are stored row-major (`data[z * width + x]`), already scaled to
/// world units. The field spans `[-width/2 · cell_size, width/2 · cell_size]`
/// on X and the equivalent range on Z.
#[derive(Clone, Debug)]
pub struct HeightField {
    heights: Vec<f32>,
    width: usize,
    height: usize,
    cell_size: f32,
    max_height: f32,
}

impl HeightField {
    /// Builds a field from normalized `[0, 1]` samples (e.g. the red channel
    /// of an 8-bit heightmap image divided by 255). Each sample is scaled by
    /// `max_height` to produce a world-space height.
    ///
    /// `samples` is row-major: `samples[z * width + x]`.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != width * height`, if either dimension is
    /// zero, if `cell_size` is not strictly positive, or if `max_height` is
    /// negative.
    pub fn from_normalized(
        samples: &[f32],
        width: usize,
        height: usize,
        cell_size: f32,
        max_height: f32,
    ) -> Self {
        assert!(
            width > 0 && height > 0,
            "HeightField dimensions must be non-zero (got {width}×{height})"
        );
        assert_eq!(
            samples.len(),
            width * height,
            "sample count must match dimensions ({width}×{height})"
        );
        assert!(
            cell_size > 0.0,
            "cell_size must be positive, got {cell_size}"
        );
        assert!(
            max_height >= 0.0,
            "max_height must be non-negative, got {max_height}"
        );

        let heights = samples.iter().map(|s| s * max_height).collect();

        Self {
            heights,
            width,
            height,
            cell_size,
            max_height,
        }
    }

    /// Height at grid cell `(x, z)`, in world units.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `z >= height`.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        assert!(x < self.width && z < self.height);
        self.heights[z * self.width + x]
    }

    /// Number of samples along the X axis.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of samples along the Z axis.
    pub fn height(&self) -> usize {
        self.height
    }

    /// World distance between adjacent samples.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Scale factor applied to the normalized input samples.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Total world extent along X.
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.cell_size
    }

    /// Total world extent along Z.
    pub fn world_depth(&self) -> f32 {
        self.height as f32 * self.cell_size
    }

    /// Queries height and steepness at a continuous world position.
    ///
    /// Coordinates outside the field are clamped to the nearest boundary, so
    /// the query never fails. The result is a pure function of the stored
    /// heights and the inputs.
    ///
    /// Interpolation runs along the Z axis only (`(x1, z1)` to `(x1, z2)`),
    /// with the lerp factor averaged from both fractional remainders. A
    /// single-axis blend, not full bilinear — kept as a known approximation.
    pub fn sample(&self, world_x: f32, world_z: f32) -> HeightSample {
        let half_w = self.width as f32 / 2.0 * self.cell_size;
        let half_d = self.height as f32 / 2.0 * self.cell_size;

        // Clamp onto the field, then shift out of the negative range so grid
        // coordinates start at zero.
        let x = (world_x.clamp(-half_w, half_w) + half_w) / self.cell_size;
        let z = (world_z.clamp(-half_d, half_d) + half_d) / self.cell_size;

        let x1 = (x as usize).min(self.width - 1);
        let z1 = (z as usize).min(self.height - 1);

        // The +1 neighbor clamps at the border; no wraparound.
        let z2 = if z1 + 1 == self.height { z1 } else { z1 + 1 };

        let h1 = self.get(x1, z1);
        let h2 = self.get(x1, z2);

        let steepness = ((h1 - h2).abs() / (self.cell_size * std::f32::consts::SQRT_2)).atan();

        // Average the fractional parts lost when truncating to cell indices.
        let leftover = ((x - x1 as f32) + (z - z1 as f32)) / 2.0;

        HeightSample {
            height: h1 + (h2 - h1) * leftover,
            steepness,
        }
    }
}
