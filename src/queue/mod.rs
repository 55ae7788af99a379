// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod budget;
pub mod context;
pub mod scheduler;
pub mod task_group;
