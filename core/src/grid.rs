// core/src/grid.rs
use crate::errors::ModelError;
use crate::models::{Profile, Weather};
use crate::physics::{sigmoid, solve_speed};

pub const HEADING_BIN_DEG: f64 = 15.0;
pub const HEADING_BIN_COUNT: usize = 24;
pub const GRADE_BIN_COUNT: usize = 9;

/// Sigmoid-parametre for kraftjustering i bakker. Modellrytteren
/// trykker hardere oppover og slipper opp nedover i stedet for å
/// holde rå kraft konstant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerModulation {
    pub a: f64,
    pub b: f64,
}

impl Default for PowerModulation {
    fn default() -> Self {
        Self { a: 0.8, b: 0.5 }
    }
}

impl PowerModulation {
    /// Faktor som skalerer kraften for en gitt stigning i prosent.
    #[inline]
    pub fn factor(&self, slope_pct: f64) -> f64 {
        sigmoid(slope_pct, self.a, self.b)
    }
}

/// Ni navngitte stigningskategorier med representative stigninger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBin {
    SteepDown,
    MajorDown,
    MediumDown,
    GentleDown,
    Flat,
    GentleUp,
    MediumUp,
    MajorUp,
    SteepUp,
}

impl GradeBin {
    pub const ALL: [GradeBin; GRADE_BIN_COUNT] = [
        GradeBin::SteepDown,
        GradeBin::MajorDown,
        GradeBin::MediumDown,
        GradeBin::GentleDown,
        GradeBin::Flat,
        GradeBin::GentleUp,
        GradeBin::MediumUp,
        GradeBin::MajorUp,
        GradeBin::SteepUp,
    ];

    /// Nedre grenser i stigende rekkefølge. Siste grense som er strengt
    /// under stigningen vinner (monoton bøtteinndeling).
    const BOUNDS_PCT: [f64; GRADE_BIN_COUNT] =
        [-999.0, -6.0, -4.0, -2.0, -1.0, 1.0, 2.0, 4.0, 6.0];

    /// Representativ stigning for binnen, i prosent.
    pub fn grade_pct(self) -> f64 {
        match self {
            GradeBin::SteepDown => -8.0,
            GradeBin::MajorDown => -5.0,
            GradeBin::MediumDown => -3.0,
            GradeBin::GentleDown => -1.5,
            GradeBin::Flat => 0.0,
            GradeBin::GentleUp => 1.5,
            GradeBin::MediumUp => 3.0,
            GradeBin::MajorUp => 5.0,
            GradeBin::SteepUp => 8.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GradeBin::SteepDown => "SteepDown",
            GradeBin::MajorDown => "MajorDown",
            GradeBin::MediumDown => "MediumDown",
            GradeBin::GentleDown => "GentleDown",
            GradeBin::Flat => "Flat",
            GradeBin::GentleUp => "GentleUp",
            GradeBin::MediumUp => "MediumUp",
            GradeBin::MajorUp => "MajorUp",
            GradeBin::SteepUp => "SteepUp",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Binne for en stigning i prosent: største grense som ikke overskrides.
    /// Alt på eller under laveste grense havner i SteepDown, alt over
    /// høyeste i SteepUp.
    pub fn from_slope_pct(slope_pct: f64) -> GradeBin {
        let mut hit = GradeBin::SteepDown;
        for (i, bound) in Self::BOUNDS_PCT.iter().enumerate() {
            if slope_pct > *bound {
                hit = Self::ALL[i];
            }
        }
        hit
    }
}

/// Oppslagstabell over stasjonær hastighet (m/s) per (kurs-binne,
/// stignings-binne) for ett fast (profil, vær)-par. Fullt utfylt ved
/// konstruksjon; ren memoisering, bygges på nytt når parametre endres.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityGrid {
    v_ms: [[f64; GRADE_BIN_COUNT]; HEADING_BIN_COUNT],
}

impl VelocityGrid {
    /// Bygger tabellen: 24 kurser × 9 stigninger, kraften justert per
    /// stigningsbinne med sigmoiden. Deterministisk for like innganger.
    pub fn build(
        profile: &Profile,
        weather: &Weather,
        modulation: PowerModulation,
    ) -> Result<Self, ModelError> {
        let mut v_ms = [[0.0; GRADE_BIN_COUNT]; HEADING_BIN_COUNT];
        for (i, row) in v_ms.iter_mut().enumerate() {
            let bearing = i as f64 * HEADING_BIN_DEG;
            for bin in GradeBin::ALL {
                let power = profile.power_w * modulation.factor(bin.grade_pct());
                row[bin.index()] =
                    solve_speed(profile, weather, bin.grade_pct() / 100.0, bearing, power)?;
            }
        }
        Ok(Self { v_ms })
    }

    /// Kurs-binne for en heading: floor(h/15)·15.
    #[inline]
    pub fn heading_bin(heading_deg: f64) -> f64 {
        (heading_deg / HEADING_BIN_DEG).floor() * HEADING_BIN_DEG
    }

    /// Slår opp hastighet (m/s). Binner utenfor tabellen er et
    /// invariantbrudd og gir DegenerateBin.
    pub fn lookup(&self, heading_bin_deg: f64, bin: GradeBin) -> Result<f64, ModelError> {
        let idx = heading_bin_deg / HEADING_BIN_DEG;
        if !idx.is_finite() || idx.fract() != 0.0 || idx < 0.0 || idx >= HEADING_BIN_COUNT as f64 {
            return Err(ModelError::DegenerateBin {
                heading_deg: heading_bin_deg,
                slope_pct: bin.grade_pct(),
            });
        }
        Ok(self.v_ms[idx as usize][bin.index()])
    }
}
