//! StateStream - 遅延つきの状態配信
//!
//! # 配信モデル
//! - 遷移ごとに新しいスナップショットを全購読者のキューに積む（呼び出し側はブロックしない）
//! - 各スナップショットは `[min, max]` ミリ秒のランダムな遅延の後に観測可能になる
//! - 購読者ごとに FIFO。遅延が短い後続の値が先に届くことはない
//! - 配信中の値のキャンセルはない（積まれた値はすべて順番に届く）
//!
//! 配信はスレッドではなく、購読者が `next().await` するイベントループ上で行われます。

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::config::DelayRange;
use crate::domain::state::GameState;
use crate::ports::RandomSource;

/// 配信待ちの 1 件
#[derive(Debug)]
struct Delivery {
    state: Arc<GameState>,
    deliver_at: Instant,
}

/// StateStream は GameState の購読ハンドル
///
/// # 使用例
/// ```ignore
/// let mut stream = store.subscribe();
/// while let Some(state) = stream.next().await {
///     println!("{:?}", state.winner_board);
/// }
/// ```
#[derive(Debug)]
pub struct StateStream {
    rx: mpsc::UnboundedReceiver<Delivery>,
}

impl StateStream {
    /// 次の状態を待つ
    ///
    /// store が drop され、積まれた値をすべて受け取った後は `None`。
    pub async fn next(&mut self) -> Option<Arc<GameState>> {
        let delivery = self.rx.recv().await?;
        tokio::time::sleep_until(delivery.deliver_at).await;
        Some(delivery.state)
    }
}

/// Broadcaster は購読者の集合と遅延の決め方を持つ
pub(crate) struct Broadcaster {
    subscribers: Vec<mpsc::UnboundedSender<Delivery>>,
    delay: DelayRange,
    random: Arc<dyn RandomSource>,
}

impl Broadcaster {
    pub(crate) fn new(delay: DelayRange, random: Arc<dyn RandomSource>) -> Self {
        Self {
            subscribers: Vec::new(),
            delay,
            random,
        }
    }

    /// 新しい購読者は、まず現在の状態を（同じく遅延つきで）受け取る
    pub(crate) fn subscribe(&mut self, current: Arc<GameState>) -> StateStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let deliver_at = self.next_deadline();
        // rx はここで生きているので失敗しない
        let _ = tx.send(Delivery {
            state: current,
            deliver_at,
        });
        self.subscribers.push(tx);
        StateStream { rx }
    }

    /// Queue `state` for every live subscriber; closed streams are dropped.
    pub(crate) fn publish(&mut self, state: &Arc<GameState>) {
        if self.subscribers.is_empty() {
            return;
        }
        let deliver_at = self.next_deadline();
        self.subscribers.retain(|tx| {
            tx.send(Delivery {
                state: Arc::clone(state),
                deliver_at,
            })
            .is_ok()
        });
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn next_deadline(&self) -> Instant {
        Instant::now() + self.delay.sample(|span| self.random.index(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weapon::classic_catalog;
    use crate::impls::ScriptedRandom;
    use std::time::Duration;

    fn snapshot(started: bool) -> Arc<GameState> {
        Arc::new(GameState {
            started,
            ..GameState::initial(classic_catalog())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn delivery_waits_for_the_sampled_delay() {
        // span = 501、台本の 100 → 700ms
        let mut broadcaster = Broadcaster::new(
            DelayRange { min: 600, max: 1100 },
            Arc::new(ScriptedRandom::new([100])),
        );
        let start = Instant::now();
        let mut stream = broadcaster.subscribe(snapshot(false));

        let state = stream.next().await.unwrap();
        assert!(!state.started);
        assert_eq!(start.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn later_short_delay_does_not_overtake() {
        // 1 件目: 600 + 500 = 1100ms、2 件目: 600 + 0 = 600ms
        let mut broadcaster = Broadcaster::new(
            DelayRange { min: 600, max: 1100 },
            Arc::new(ScriptedRandom::new([500, 0])),
        );
        let start = Instant::now();
        let mut stream = broadcaster.subscribe(snapshot(false));
        broadcaster.publish(&snapshot(true));

        let first = stream.next().await.unwrap();
        assert!(!first.started);
        assert_eq!(start.elapsed(), Duration::from_millis(1100));

        let second = stream.next().await.unwrap();
        assert!(second.started);
        assert_eq!(start.elapsed(), Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_streams_are_pruned() {
        let mut broadcaster =
            Broadcaster::new(DelayRange::fixed(0), Arc::new(ScriptedRandom::default()));
        let kept = broadcaster.subscribe(snapshot(false));
        let dropped = broadcaster.subscribe(snapshot(false));
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(dropped);
        broadcaster.publish(&snapshot(true));
        assert_eq!(broadcaster.subscriber_count(), 1);
        drop(kept);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_ends_after_broadcaster_is_gone() {
        let mut broadcaster =
            Broadcaster::new(DelayRange::fixed(0), Arc::new(ScriptedRandom::default()));
        let mut stream = broadcaster.subscribe(snapshot(false));
        broadcaster.publish(&snapshot(true));
        drop(broadcaster);

        assert!(!stream.next().await.unwrap().started);
        assert!(stream.next().await.unwrap().started);
        assert!(stream.next().await.is_none());
    }
}
