// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Small parsers for the textual forms of sizes, points and colours
//! used on the command line.

use num::Complex;
use std::str::FromStr;

use config::Rgb;

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

/// Parses `R,G,B` with each channel a byte.
pub fn parse_color(s: &str) -> Option<Rgb> {
    let channels: Vec<u8> = s
        .split(',')
        .map(|c| u8::from_str(c.trim()))
        .collect::<Result<_, _>>()
        .ok()?;
    match channels.as_slice() {
        [r, g, b] => Some(Rgb(*r, *g, *b)),
        _ => None,
    }
}

/// Parses a colour table entry, `KEY=R,G,B`.
pub fn parse_color_entry(s: &str) -> Option<(String, Rgb)> {
    let index = s.find('=')?;
    let key = s[..index].trim();
    if key.is_empty() {
        return None;
    }
    parse_color(&s[index + 1..]).map(|color| (key.to_string(), color))
}
