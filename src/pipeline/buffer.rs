use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

/// Fixed-size grid of characters the rasterizer draws into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: char,
    data: Vec<char>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: char) -> Self {
        Self {
            width,
            height,
            background,
            data: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resets every cell to the background character.
    pub fn clear(&mut self) {
        self.data.fill(self.background);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y) {
            Some(x as usize + y as usize * self.width)
        } else {
            None
        }
    }

    /// Writes `ch` at (x, y). Cells outside the canvas are skipped; returns
    /// whether anything was written.
    pub fn set(&mut self, x: i64, y: i64, ch: char) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = ch;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, x: i64, y: i64) -> Option<char> {
        self.index(x, y).map(|i| self.data[i])
    }

    pub fn row(&self, y: usize) -> &[char] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Coordinates of every cell that differs from the background, row-major.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != self.background)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Writes a full redraw: hide cursor, clear, then every row at its own
    /// line so raw-mode terminals need no carriage returns.
    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut output = String::with_capacity((self.width + 8) * self.height + 16);

        output.push_str("\x1B[?25l"); // Hide cursor
        output.push_str("\x1B[2J"); // Clear screen
        output.push_str("\x1B[H"); // Home

        for y in 0..self.height {
            output.push_str(&format!("\x1B[{};{}H", y + 1, 1));
            output.extend(self.row(y));
        }

        out.write_all(output.as_bytes())?;
        out.flush()
    }
}

impl Display for Canvas {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for &c in self.row(y) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
