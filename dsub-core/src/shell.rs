use crate::error::SpecError;
use crate::model::{Gender, ShellSize};

/// Nominal mating-face dimensions for one shell size and gender (mm).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellGeometry {
    pub opening_top_w: f64,
    pub opening_h: f64,
    pub flange_h: f64,
}

const fn geom(opening_top_w: f64, opening_h: f64, flange_h: f64) -> ShellGeometry {
    ShellGeometry {
        opening_top_w,
        opening_h,
        flange_h,
    }
}

/// Nominal geometry table. The match is exhaustive over every
/// (shell, gender) pair.
pub fn shell_geometry(shell: ShellSize, gender: Gender) -> ShellGeometry {
    use Gender::{Female, Male};
    match (shell, gender) {
        (ShellSize::E, Male) => geom(16.90, 8.30, 12.50),
        (ShellSize::E, Female) => geom(16.30, 7.90, 12.50),
        (ShellSize::A, Male) => geom(25.25, 8.30, 12.50),
        (ShellSize::A, Female) => geom(24.60, 7.90, 12.50),
        (ShellSize::B, Male) => geom(38.95, 8.30, 12.50),
        (ShellSize::B, Female) => geom(38.40, 7.90, 12.50),
        (ShellSize::C, Male) => geom(55.40, 8.30, 12.50),
        (ShellSize::C, Female) => geom(54.80, 7.90, 12.50),
        (ShellSize::D, Male) => geom(52.80, 11.15, 15.30),
        (ShellSize::D, Female) => geom(52.20, 10.90, 15.30),
    }
}

/// Look up nominal geometry by raw shell letter.
pub fn lookup_shell(letter: &str, gender: Gender) -> Result<ShellGeometry, SpecError> {
    let shell: ShellSize = letter.parse()?;
    Ok(shell_geometry(shell, gender))
}
