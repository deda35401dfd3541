// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Language byte histograms and the percentage breakdown derived from them.
//!
//! The forge reports languages as a JSON object. Entries are kept in the
//! order the forge sent them so that ties (equal byte counts, equal
//! percentages) always resolve to the first-seen language.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Mapping from language name to byte count, in forge order.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct LanguageHistogram
{
    entries: Vec<(String, u64,),>,
}

impl LanguageHistogram
{
    /// Builds a histogram from `(language, bytes)` pairs.
    ///
    /// Repeated languages keep their first position and the last byte count.
    pub fn from_pairs<I, S,>(pairs: I,) -> Self
    where
        I: IntoIterator<Item = (S, u64,),>,
        S: Into<String,>,
    {
        let mut histogram = Self::default();
        for (language, bytes,) in pairs {
            histogram.insert(language.into(), bytes,);
        }
        histogram
    }

    fn insert(&mut self, language: String, bytes: u64,)
    {
        match self.entries.iter_mut().find(|(name, _,)| *name == language,) {
            Some(entry,) => entry.1 = bytes,
            None => self.entries.push((language, bytes,),),
        }
    }

    pub fn is_empty(&self,) -> bool
    {
        self.entries.is_empty()
    }

    pub fn len(&self,) -> usize
    {
        self.entries.len()
    }

    pub fn total_bytes(&self,) -> u64
    {
        self.entries.iter().fold(0u64, |acc, (_, bytes,)| acc.saturating_add(*bytes,),)
    }

    /// Language with the largest byte count.
    ///
    /// Ties resolve to the language the forge listed first. Returns `None`
    /// for an empty histogram.
    pub fn primary(&self,) -> Option<&str,>
    {
        let mut best: Option<&(String, u64,),> = None;
        for entry in &self.entries {
            if best.is_none_or(|current| entry.1 > current.1,) {
                best = Some(entry,);
            }
        }
        best.map(|(name, _,)| name.as_str(),)
    }

    /// Percentage share of each language, rounded to one decimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use repopage::LanguageHistogram;
    ///
    /// let histogram =
    ///     LanguageHistogram::from_pairs([("Python", 1000,), ("JavaScript", 500,), ("CSS", 100,),],);
    /// let breakdown = histogram.percentages();
    /// assert_eq!(breakdown.get("Python"), Some(62.5));
    /// assert_eq!(breakdown.get("JavaScript"), Some(31.2));
    /// assert_eq!(breakdown.get("CSS"), Some(6.2));
    /// ```
    pub fn percentages(&self,) -> LanguageBreakdown
    {
        let total = self.total_bytes();
        if total == 0 {
            return LanguageBreakdown::default();
        }

        let shares = self
            .entries
            .iter()
            .map(|(name, bytes,)| LanguageShare {
                name:    name.clone(),
                percent: round_tenth(*bytes as f64 / total as f64 * 100.0,),
            },)
            .collect();

        LanguageBreakdown {
            shares,
        }
    }
}

/// Rounds to one decimal place, resolving exact halves to the even digit.
fn round_tenth(value: f64,) -> f64
{
    (value * 10.0).round_ties_even() / 10.0
}

impl<'de,> Deserialize<'de,> for LanguageHistogram
{
    fn deserialize<D,>(deserializer: D,) -> Result<Self, D::Error,>
    where
        D: Deserializer<'de,>,
    {
        struct HistogramVisitor;

        impl<'de,> Visitor<'de,> for HistogramVisitor
        {
            type Value = LanguageHistogram;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_,>,) -> fmt::Result
            {
                formatter.write_str("a map of language names to byte counts",)
            }

            fn visit_map<A,>(self, mut access: A,) -> Result<Self::Value, A::Error,>
            where
                A: MapAccess<'de,>,
            {
                let mut histogram = LanguageHistogram::default();
                while let Some((language, bytes,),) = access.next_entry::<String, u64>()? {
                    histogram.insert(language, bytes,);
                }
                Ok(histogram,)
            }
        }

        deserializer.deserialize_map(HistogramVisitor,)
    }
}

/// One language and its rounded share of the repository.
#[derive(Debug, Clone, PartialEq,)]
pub struct LanguageShare
{
    pub name:    String,
    pub percent: f64,
}

/// Percentage breakdown in forge order.
#[derive(Debug, Clone, Default, PartialEq,)]
pub struct LanguageBreakdown
{
    shares: Vec<LanguageShare,>,
}

impl LanguageBreakdown
{
    pub fn is_empty(&self,) -> bool
    {
        self.shares.is_empty()
    }

    pub fn len(&self,) -> usize
    {
        self.shares.len()
    }

    pub fn get(&self, language: &str,) -> Option<f64,>
    {
        self.shares.iter().find(|share| share.name == language,).map(|share| share.percent,)
    }

    pub fn iter(&self,) -> impl Iterator<Item = &LanguageShare,>
    {
        self.shares.iter()
    }

    /// Shares sorted by descending percentage; equal shares keep forge order.
    pub fn ranked(&self,) -> Vec<&LanguageShare,>
    {
        let mut ranked: Vec<&LanguageShare,> = self.shares.iter().collect();
        ranked.sort_by(|left, right| right.percent.total_cmp(&left.percent,),);
        ranked
    }
}

impl FromIterator<(String, f64,),> for LanguageBreakdown
{
    fn from_iter<I: IntoIterator<Item = (String, f64,),>,>(iter: I,) -> Self
    {
        Self {
            shares: iter
                .into_iter()
                .map(|(name, percent,)| LanguageShare {
                    name,
                    percent,
                },)
                .collect(),
        }
    }
}

impl Serialize for LanguageBreakdown
{
    fn serialize<S,>(&self, serializer: S,) -> Result<S::Ok, S::Error,>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.shares.len(),),)?;
        for share in &self.shares {
            map.serialize_entry(&share.name, &share.percent,)?;
        }
        map.end()
    }
}
