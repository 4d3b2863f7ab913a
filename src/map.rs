use crate::error::ConfigError;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Which shipped phrase table to start from.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    /// Markdown headings, section phrases and common words
    #[default]
    Headings,
    /// Term dictionary for titles and product vocabulary
    Glossary,
}

impl Table {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "headings" => Some(Table::Headings),
            "glossary" => Some(Table::Glossary),
            _ => None,
        }
    }
}

/// A validated, immutable source-to-target phrase table.
///
/// Entries are kept in match order: longest source first, ties broken by the
/// source text so the order never depends on how the table was written.
#[derive(Debug, Clone)]
pub struct TranslationMap {
    entries: Vec<(String, String)>,
}

impl TranslationMap {
    pub fn new<I, S, T>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (source, target) in pairs {
            let (source, target) = (source.into(), target.into());
            if source.is_empty() {
                return Err(ConfigError::EmptyPhrase(target));
            }
            if !seen.insert(source.clone()) {
                return Err(ConfigError::DuplicatePhrase(source));
            }
            entries.push((source, target));
        }

        check_conflicts(&entries)?;

        entries.sort_by(match_order);
        Ok(Self { entries })
    }

    pub fn builtin(table: Table) -> Self {
        let pairs = match table {
            Table::Headings => HEADINGS,
            Table::Glossary => GLOSSARY,
        };
        Self {
            entries: sorted(pairs),
        }
    }

    /// Replace entries sharing a source with `overrides`, append the rest.
    pub fn with_overrides<I, S, T>(&self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let overrides = Self::new(overrides)?;
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|(source, _)| overrides.get(source).is_none())
            .cloned()
            .collect();
        pairs.extend(overrides.entries);
        Self::new(pairs)
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, t)| t.as_str())
    }

    /// Entries in match order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn match_order(a: &(String, String), b: &(String, String)) -> Ordering {
    b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0))
}

fn sorted(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = pairs
        .iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    entries.sort_by(match_order);
    entries
}

/// Whether `source` can be formed across an edge of an inserted `target`:
/// `target` sits inside `source`, or a suffix of `target` starts `source`,
/// or a prefix of `target` ends it.
fn straddles(target: &str, source: &str) -> bool {
    if source.contains(target) {
        return true;
    }
    let suffix_starts = target
        .char_indices()
        .skip(1)
        .any(|(i, _)| source.starts_with(&target[i..]));
    let prefix_ends = target
        .char_indices()
        .skip(1)
        .any(|(i, _)| source.ends_with(&target[..i]));
    suffix_starts || prefix_ends
}

// A target may contain identity sources ("bytekin" in "bytekinの仕組み") but
// never a source that would be rewritten on a second pass, whether inside the
// target or joined with the text around it.
fn check_conflicts(entries: &[(String, String)]) -> Result<(), ConfigError> {
    for (source, target) in entries {
        if source == target {
            continue;
        }
        for (other, other_target) in entries {
            if other == other_target {
                continue;
            }
            if target.contains(other.as_str()) {
                return Err(ConfigError::ConflictingTarget {
                    source_phrase: source.clone(),
                    target: target.clone(),
                    contained: other.clone(),
                });
            }
        }
        for (other, other_target) in entries {
            if other == other_target {
                continue;
            }
            if straddles(target, other) {
                return Err(ConfigError::OverlappingTarget {
                    source_phrase: source.clone(),
                    target: target.clone(),
                    overlapping: other.clone(),
                });
            }
        }
    }
    Ok(())
}

const HEADINGS: &[(&str, &str)] = &[
    // Headers and titles
    ("# Introduction to bytekin", "# bytekinのイントロダクション"),
    ("# Getting Started with bytekin", "# bytekinを使い始める"),
    ("# Installation Guide", "# インストールガイド"),
    ("# Your First Transformation", "# 最初の変換"),
    ("# Core Concepts", "# コアコンセプト"),
    ("# Bytecode Basics", "# バイトコード基礎"),
    ("# How bytekin Works", "# bytekinの仕組み"),
    ("# Features Overview", "# 機能概要"),
    ("# Inject Transformation", "# インジェクション変換"),
    ("# Invoke Transformation", "# インボケーション変換"),
    ("# Redirect Transformation", "# リダイレクト変換"),
    ("# Constant Modification", "# 定数修正"),
    ("# Variable Modification", "# 変数修正"),
    ("# Advanced Usage", "# 高度な使用法"),
    ("# Mappings", "# マッピング"),
    ("# Builder Pattern", "# ビルダーパターン"),
    ("# Custom Transformers", "# カスタムトランスフォーマー"),
    ("# API Reference", "# APIリファレンス"),
    ("# Annotations Reference", "# アノテーション リファレンス"),
    ("# Classes and Interfaces", "# クラスとインターフェース"),
    ("# Examples", "# 例"),
    ("# Examples - Basic Usage", "# 例 - 基本的な使用法"),
    ("# Advanced Examples", "# 高度な例"),
    ("# Best Practices", "# ベストプラクティス"),
    ("# FAQ - Frequently Asked Questions", "# FAQ - よくある質問"),
    ("# Troubleshooting Guide", "# トラブルシューティングガイド"),
    // Section phrases
    ("## Prerequisites", "## 前提条件"),
    ("## Installation", "## インストール"),
    ("## Overview", "## 概要"),
    ("## Key Features", "## 主な機能"),
    ("## Use Cases", "## ユースケース"),
    ("## Next Steps", "## 次のステップ"),
    ("## What is", "## とは"),
    ("## How it works", "## 仕組み"),
    ("## Example", "## 例"),
    ("## Parameters", "## パラメータ"),
    ("## Scope", "## スコープ"),
    // Common words
    ("bytekin", "bytekin"),
    ("bytecode", "バイトコード"),
    ("transformation", "変換"),
    ("injection", "インジェクション"),
    ("invocation", "インボケーション"),
    ("Java", "Java"),
    ("JVM", "JVM"),
];

const GLOSSARY: &[(&str, &str)] = &[
    ("Introduction", "イントロダクション"),
    ("Getting Started", "はじめに"),
    ("Installation", "インストール"),
    ("Core Concepts", "コアコンセプト"),
    ("Bytecode Basics", "バイトコード基礎"),
    ("How bytekin Works", "bytekinの仕組み"),
    ("Features", "機能"),
    ("Inject", "インジェクション"),
    ("Invoke", "インボケーション"),
    ("Redirect", "リダイレクト"),
    ("Constant Modification", "定数修正"),
    ("Variable Modification", "変数修正"),
    ("Advanced Usage", "高度な使用法"),
    ("Mappings", "マッピング"),
    ("Builder Pattern", "ビルダーパターン"),
    ("Custom Transformers", "カスタムトランスフォーマー"),
    ("API Reference", "APIリファレンス"),
    ("Annotations", "アノテーション"),
    ("Classes and Interfaces", "クラスとインターフェース"),
    ("Examples", "例"),
    ("Best Practices", "ベストプラクティス"),
    ("FAQ", "FAQ"),
    ("Troubleshooting", "トラブルシューティング"),
    ("bytekin", "bytekin"),
    ("bytecode", "バイトコード"),
    ("transformation", "変換"),
    ("Java", "Java"),
    ("JVM", "JVM"),
];
