// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod lexicon;
pub mod outcome;
pub mod resource;
pub mod summary;
pub mod word_count;
