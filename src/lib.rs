// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 命令行模块
///
/// 解析命令行参数并覆盖配置项
pub mod cli;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体（词库、资源、任务结果）、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现文章抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供共享聚合表、临时存储和指标等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 负责最终排行报告的生成与输出
pub mod presentation;

/// 队列模块
///
/// 实现有界并发调度、完成追踪和截止时间控制
pub mod queue;

/// 工具模块
///
/// 提供输入加载、错误类型和遥测等辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现单个资源的抓取与计数任务链
pub mod workers;
