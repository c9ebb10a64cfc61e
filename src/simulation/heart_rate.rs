// ABOUTME: Bounded rolling heart-rate history feeding the live graph
// ABOUTME: Keeps the last N readings with drop-oldest semantics and projects them to polyline points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::collections::VecDeque;

use dreamband_core::constants::session;

/// Graph floor: the vertical scale never zooms in past this value
const GRAPH_FLOOR_BPM: u32 = 50;
/// Graph ceiling: the vertical scale never zooms in past this value
const GRAPH_CEILING_BPM: u32 = 80;
/// Share of the graph height used by the trace
const GRAPH_FILL: f64 = 0.8;
/// Gap kept between the trace and the bottom edge (px)
const GRAPH_INSET: f64 = 5.0;

/// FIFO of recent heart-rate readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartRateHistory {
    readings: VecDeque<u32>,
    capacity: usize,
}

impl HeartRateHistory {
    /// Empty history with room for `capacity` readings (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// History seeded with the pre-tick heart rate
    #[must_use]
    pub fn seeded() -> Self {
        let mut history = Self::with_capacity(session::HEART_RATE_HISTORY_LEN);
        history.push(session::INITIAL_HEART_RATE);
        history
    }

    /// Append a reading, dropping the oldest one when full
    pub fn push(&mut self, bpm: u32) {
        if self.readings.len() == self.capacity {
            self.readings.pop_front();
        }
        self.readings.push_back(bpm);
    }

    /// Readings oldest first
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.readings.iter().copied().collect()
    }

    /// Most recent reading
    #[must_use]
    pub fn latest(&self) -> Option<u32> {
        self.readings.back().copied()
    }

    /// Number of readings held
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether no reading has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Maximum number of readings retained
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Project readings onto a `width` x `height` polyline (y grows downwards)
    #[must_use]
    pub fn graph_points(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        let max = self
            .readings
            .iter()
            .copied()
            .max()
            .map_or(GRAPH_CEILING_BPM, |m| m.max(GRAPH_CEILING_BPM));
        let min = self
            .readings
            .iter()
            .copied()
            .min()
            .map_or(GRAPH_FLOOR_BPM, |m| m.min(GRAPH_FLOOR_BPM));
        let range = f64::from(max - min).max(1.0);
        let last = self.readings.len().saturating_sub(1).max(1) as f64;

        self.readings
            .iter()
            .enumerate()
            .map(|(i, &bpm)| {
                let x = i as f64 / last * width;
                let y = (f64::from(bpm - min) / range).mul_add(-height * GRAPH_FILL, height)
                    - GRAPH_INSET;
                (x, y)
            })
            .collect()
    }
}

impl Default for HeartRateHistory {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_points_scale() {
        let mut history = HeartRateHistory::with_capacity(30);
        history.push(50);
        history.push(80);
        let points = history.graph_points(280.0, 60.0);
        assert_eq!(points.len(), 2);
        assert!((points[0].0 - 0.0).abs() < f64::EPSILON);
        assert!((points[0].1 - 55.0).abs() < 1e-9);
        assert!((points[1].0 - 280.0).abs() < 1e-9);
        assert!((points[1].1 - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_sits_at_origin() {
        let history = HeartRateHistory::seeded();
        let points = history.graph_points(280.0, 60.0);
        assert_eq!(points.len(), 1);
        assert!(points[0].0.abs() < f64::EPSILON);
    }
}
