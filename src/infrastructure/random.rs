//! 随机数源 - 基础设施层
//!
//! 滚动距离、等待时长、概率退出等全部随机决策都经过这个 trait，
//! 测试中换成脚本化实现即可得到确定性行为。

use rand::Rng;

/// 随机数能力
pub trait RandomSource {
    /// 闭区间 [lo, hi] 内的随机整数
    fn int_between(&self, lo: u32, hi: u32) -> u32;

    /// 半开区间 [lo, hi) 内的随机浮点数
    fn float_between(&self, lo: f64, hi: f64) -> f64;

    /// 以 probability 的概率返回 true
    fn roll(&self, probability: f64) -> bool;
}

/// 生产实现：每次调用取线程本地 RNG
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_between(&self, lo: u32, hi: u32) -> u32 {
        rand::thread_rng().gen_range(lo..=hi)
    }

    fn float_between(&self, lo: f64, hi: f64) -> f64 {
        rand::thread_rng().gen_range(lo..hi)
    }

    fn roll(&self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability)
    }
}
