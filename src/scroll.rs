//! Sliding window over a padded sequence
//!
//! [`ScrollBuffer`] is the core of the marquee: the same type scrolls text
//! glyphs across the display and colors along the strip.

use core::fmt;

use heapless::Vec;

/// Error returned when a seed does not fit into the buffer capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Number of values the buffer would have to hold
    pub required: usize,
    /// Fixed capacity of the buffer
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scroll buffer needs {} slots but holds {}",
            self.required, self.capacity
        )
    }
}

/// Fixed-capacity marquee generator
///
/// Holds `prefix` copies of the empty value followed by the seed, and yields
/// one window per call, moving one position forward each time. When the
/// cursor runs past the end, the next call yields an all-empty window and
/// rewinds, so a full cycle takes `len() + 1` calls.
///
/// `N` is the maximum padded length.
#[derive(Debug, Clone)]
pub struct ScrollBuffer<T, const N: usize> {
    values: Vec<T, N>,
    empty: T,
    cursor: usize,
}

impl<T: Copy, const N: usize> ScrollBuffer<T, N> {
    /// Create a buffer from a seed slice.
    ///
    /// # Panics
    ///
    /// Panics if `prefix + seed.len()` exceeds `N`.
    pub fn new(seed: &[T], empty: T, prefix: usize) -> Self {
        match Self::try_from_iter(seed.iter().copied(), empty, prefix) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a buffer from any seed sequence.
    ///
    /// Returns [`CapacityError`] if the padded seed does not fit.
    pub fn try_from_iter<I>(seed: I, empty: T, prefix: usize) -> Result<Self, CapacityError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T, N> = Vec::new();
        let fits = values.resize(prefix, empty).is_ok();
        let mut required = prefix;
        for value in seed {
            required += 1;
            // Past capacity the values are only counted, for the error
            if fits {
                let _ = values.push(value);
            }
        }
        if required > N {
            return Err(CapacityError {
                required,
                capacity: N,
            });
        }

        Ok(Self {
            values,
            empty,
            cursor: 0,
        })
    }

    /// Produce the next window of `W` values.
    #[allow(clippy::should_implement_trait)]
    pub fn next<const W: usize>(&mut self) -> [T; W] {
        const { assert!(W > 0, "window width must be positive") };

        let mut window = [self.empty; W];
        self.fill_next(&mut window);
        window
    }

    /// Fill `window` with the next window and advance the cursor.
    ///
    /// This is the allocation-free form of [`ScrollBuffer::next`]; the window
    /// width is the length of the slice.
    pub fn fill_next(&mut self, window: &mut [T]) {
        if self.cursor >= self.values.len() {
            // Wrap tick: one blank window before restarting from the top
            self.cursor = 0;
            window.fill(self.empty);
            return;
        }

        for (offset, slot) in window.iter_mut().enumerate() {
            *slot = self
                .values
                .get(self.cursor + offset)
                .copied()
                .unwrap_or(self.empty);
        }
        self.cursor += 1;
    }

    /// Rewind to the first window.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<T, const N: usize> ScrollBuffer<T, N> {
    /// Padded length (prefix plus seed)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Offset of the next window's first value
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn empty_value(&self) -> &T {
        &self.empty
    }

    /// Padded values, prefix included
    pub fn values(&self) -> &[T] {
        &self.values
    }
}
