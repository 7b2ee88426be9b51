// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Colors for conjugacy classes, keyed by element order.
//!
//! The default scheme splits an order as `2^k * m` with `m` odd. The odd part
//! picks a hue and saturation (from a fixed table for the common odd parts,
//! otherwise derived arithmetically from `m`), and `k` picks the brightness:
//! higher powers of two are darker.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{factor, split_two_power};

/// An RGB byte triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub fn red(self) -> u8 {
        self.0[0]
    }

    pub fn green(self) -> u8 {
        self.0[1]
    }

    pub fn blue(self) -> u8 {
        self.0[2]
    }
}

/// Which order-to-color mapping to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Hue from the odd part, brightness from the power of two.
    #[default]
    OddPartTable,
    /// Hue blended from the exponents of 2, 3 and the remaining primes;
    /// balanced exponents fade towards grey.
    ExponentBlend,
}

impl ColorScheme {
    pub fn color(self, order: u64) -> Rgb {
        match self {
            ColorScheme::OddPartTable => get_color(order),
            ColorScheme::ExponentBlend => exponent_blend_color(order),
        }
    }
}

/// Hue in degrees, saturation in percent, brightness in percent indexed by
/// the 2-adic valuation.
struct Tone {
    hue: u16,
    saturation: u8,
    values: &'static [u8],
}

const DEFAULT_VALUES: &[u8] = &[96, 84, 72, 60, 48, 38];

/// Odd parts that occur constantly in small groups get hand-picked tones.
const TONES: [(u64, Tone); 9] = [
    (1, Tone { hue: 0, saturation: 85, values: &[100, 100, 88, 74, 60, 48, 38] }),
    (3, Tone { hue: 215, saturation: 80, values: &[98, 88, 76, 64, 52, 40] }),
    (5, Tone { hue: 125, saturation: 70, values: DEFAULT_VALUES }),
    (7, Tone { hue: 48, saturation: 90, values: &[100, 90, 78, 66, 54, 42] }),
    (9, Tone { hue: 265, saturation: 65, values: DEFAULT_VALUES }),
    (11, Tone { hue: 28, saturation: 90, values: DEFAULT_VALUES }),
    (13, Tone { hue: 180, saturation: 70, values: DEFAULT_VALUES }),
    (15, Tone { hue: 88, saturation: 75, values: DEFAULT_VALUES }),
    (21, Tone { hue: 320, saturation: 70, values: DEFAULT_VALUES }),
];

/// Color of the conjugacy classes whose elements have the given order.
///
/// Order 1 (and the meaningless order 0) is always white.
pub fn get_color(order: u64) -> Rgb {
    if order <= 1 {
        return Rgb::WHITE;
    }
    let (k, m) = split_two_power(order);
    let (hue, saturation, values) = match TONES.iter().find(|(odd, _)| *odd == m) {
        Some((_, tone)) => (f64::from(tone.hue), f64::from(tone.saturation), tone.values),
        None => (
            ((43 * u128::from(m)) % 360) as f64,
            (60 + (17 * u128::from(m)) % 31) as f64,
            DEFAULT_VALUES,
        ),
    };
    let value = values[(k as usize).min(values.len() - 1)];
    hsv_to_rgb(hue, saturation / 100.0, f64::from(value) / 100.0)
}

fn exponent_blend_color(order: u64) -> Rgb {
    let (mut r, mut b, mut g) = (0u32, 0u32, 0u32);
    for (p, e) in factor(order) {
        match p {
            2 => r += e,
            3 => b += e,
            _ => g += e,
        }
    }
    let (r, b, g) = (r.min(10), b.min(10), g.min(10));
    let k = r.min(b).min(g);
    let (r, b, g) = (r - k, b - k, g - k);
    if r == 0 && b == 0 && g == 0 {
        let grey = (255 - 25 * k) as u8;
        return Rgb([grey, grey, grey]);
    }
    let top = r.max(b).max(g).min(11);
    let (r, b, g) = (f64::from(r), f64::from(b), f64::from(g));
    // Red sits at hue 1.0 rather than 0.0 so the blend with blue stays on the
    // near side of the wheel.
    let hue = if g == 0.0 {
        (2.0 * b + 3.0 * r) / (3.0 * r + 3.0 * b)
    } else {
        (g + 2.0 * b) / (3.0 * r + 3.0 * g + 3.0 * b)
    };
    hsv_to_rgb(
        hue * 360.0,
        1.0 - f64::from(k) / 10.0,
        1.0 - f64::from(top - 1) / 10.0,
    )
}

/// `hue` in degrees, `saturation` and `value` in `[0, 1]`.
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let chroma = value * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let byte = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([byte(r), byte(g), byte(b)])
}

/// Memo of colors by order, owned by whoever is rendering.
#[derive(Debug, Default)]
pub struct ColorCache {
    scheme: ColorScheme,
    memo: FxHashMap<u64, Rgb>,
}

impl ColorCache {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            memo: FxHashMap::default(),
        }
    }

    pub fn get(&mut self, order: u64) -> Rgb {
        let scheme = self.scheme;
        *self.memo.entry(order).or_insert_with(|| scheme.color(order))
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
