// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ordering of analyzed repositories and featured selection.

use crate::model::AnalysisRecord;

/// Sorts records by activity score, highest first, and forces the first
/// `featured` records to be featured.
///
/// The sort is stable: records with equal scores keep their collection
/// order, which is the forge's most-recently-updated-first listing order.
/// Records outside the top keep whatever featured value they already had.
pub fn rank(records: &mut [AnalysisRecord], featured: usize,) {
    records.sort_by(|left, right| right.activity_score.cmp(&left.activity_score,),);

    for record in records.iter_mut().take(featured,) {
        record.featured = true;
    }
}
