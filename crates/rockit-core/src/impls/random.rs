//! RandomSource implementations.

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::Rng;

use crate::ports::RandomSource;

/// ThreadRandom はスレッドローカルの乱数生成器を使う
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper.max(1))
    }
}

/// ScriptedRandom は与えられた値を順番に返す
///
/// 値は `upper` で丸めます（`value % upper`）。台本を使い切ったら 0 を返します。
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    script: Mutex<VecDeque<usize>>,
}

impl ScriptedRandom {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|script| script.len()).unwrap_or(0)
    }
}

impl RandomSource for ScriptedRandom {
    fn index(&self, upper: usize) -> usize {
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(0);
        next % upper.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let random = ThreadRandom;
        for upper in 1..20 {
            assert!(random.index(upper) < upper);
        }
    }

    #[test]
    fn scripted_random_replays_then_falls_back_to_zero() {
        let random = ScriptedRandom::new([2, 7, 1]);
        assert_eq!(random.index(3), 2);
        assert_eq!(random.index(3), 1);
        assert_eq!(random.index(3), 1);
        assert_eq!(random.remaining(), 0);
        assert_eq!(random.index(3), 0);
    }
}
