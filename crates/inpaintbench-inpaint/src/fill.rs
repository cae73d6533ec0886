// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fill machinery: onion-peel ordering of missing cells and the
// distance-weighted neighbourhood average both collaborators start from.

use std::collections::VecDeque;

/// Group missing cells into layers by their 8-connected step distance to the
/// nearest known cell. Layer 0 holds the missing cells touching known data.
///
/// Cells with no path to a known cell (a fully masked image) appear in no
/// layer and are left untouched by the fill.
pub(crate) fn peel_layers(width: u32, height: u32, missing: &[bool]) -> Vec<Vec<usize>> {
    let (w, h) = (width as usize, height as usize);
    let mut depth: Vec<Option<usize>> = missing.iter().map(|&m| (!m).then_some(0)).collect();
    let mut queue: VecDeque<usize> = (0..missing.len()).filter(|&i| !missing[i]).collect();
    let mut layers: Vec<Vec<usize>> = Vec::new();

    while let Some(idx) = queue.pop_front() {
        let d = depth[idx].unwrap_or(0);
        let (x, y) = (idx % w, idx / w);
        for (nx, ny) in neighbours8(x, y, w, h) {
            let n = ny * w + nx;
            if depth[n].is_none() {
                depth[n] = Some(d + 1);
                if layers.len() < d + 1 {
                    layers.push(Vec::new());
                }
                layers[d].push(n);
                queue.push_back(n);
            }
        }
    }
    layers
}

fn neighbours8(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = (usize, usize)> {
    let x0 = x.saturating_sub(1);
    let y0 = y.saturating_sub(1);
    let x1 = (x + 1).min(w - 1);
    let y1 = (y + 1).min(h - 1);
    (y0..=y1)
        .flat_map(move |ny| (x0..=x1).map(move |nx| (nx, ny)))
        .filter(move |&(nx, ny)| (nx, ny) != (x, y))
}

/// Fill `plane` layer by layer with the inverse-square-distance weighted mean
/// of settled cells inside a `radius` window.
///
/// A cell only reads cells that were known or filled in an earlier layer, so
/// the result does not depend on the order cells are visited within a layer.
pub(crate) fn peel_fill(plane: &mut [f32], width: u32, height: u32, missing: &[bool], radius: u32) {
    let (w, h) = (width as usize, height as usize);
    let r = radius.max(1) as i64;
    let mut settled: Vec<bool> = missing.iter().map(|&m| !m).collect();

    for layer in peel_layers(width, height, missing) {
        let values: Vec<f32> = layer
            .iter()
            .map(|&idx| {
                let (x, y) = ((idx % w) as i64, (idx / w) as i64);
                let mut sum = 0.0f64;
                let mut weight = 0.0f64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let (nx, ny) = (x + dx, y + dy);
                        if (dx, dy) == (0, 0) || nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64
                        {
                            continue;
                        }
                        let n = ny as usize * w + nx as usize;
                        if settled[n] {
                            let wgt = 1.0 / (dx * dx + dy * dy) as f64;
                            sum += wgt * plane[n] as f64;
                            weight += wgt;
                        }
                    }
                }
                if weight > 0.0 {
                    (sum / weight) as f32
                } else {
                    plane[idx]
                }
            })
            .collect();
        for (&idx, value) in layer.iter().zip(values) {
            plane[idx] = value;
            settled[idx] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_follow_distance_to_known_data() {
        // 5x1 strip, only the left end known.
        let missing = [false, true, true, true, true];
        let layers = peel_layers(5, 1, &missing);
        assert_eq!(layers, vec![vec![1], vec![2], vec![3], vec![4]]);
    }

    #[test]
    fn fully_masked_grid_has_no_layers() {
        assert!(peel_layers(3, 3, &[true; 9]).is_empty());
    }

    #[test]
    fn fill_interpolates_between_known_neighbours() {
        let mut plane = [10.0, 0.0, 30.0];
        peel_fill(&mut plane, 3, 1, &[false, true, false], 1);
        assert!((plane[1] - 20.0).abs() < 1e-5);
        assert_eq!(plane[0], 10.0);
        assert_eq!(plane[2], 30.0);
    }
}
