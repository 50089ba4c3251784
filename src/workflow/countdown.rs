//! 倒计时器
//!
//! 以固定周期回调 `on_tick`，回调返回 `Break` 时停止。
//! 计时任务由 `CountdownGuard` 持有，guard 被丢弃时任务一并取消。

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// 计时任务的所有权凭证
#[derive(Debug)]
pub struct CountdownGuard {
    task: JoinHandle<()>,
}

impl CountdownGuard {
    /// 计时任务是否已结束（正常停止或被取消）
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 主动取消
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for CountdownGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// 在 guard 管理下执行一次性后台任务
pub fn spawn_guarded<Fut>(work: Fut) -> CountdownGuard
where
    Fut: Future<Output = ()> + Send + 'static,
{
    CountdownGuard {
        task: tokio::spawn(work),
    }
}

/// 启动倒计时
///
/// 第一次回调发生在 `period` 之后，而不是立即发生
pub fn spawn_countdown<F, Fut>(period: Duration, mut on_tick: F) -> CountdownGuard
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ControlFlow<()>> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if on_tick().await.is_break() {
                break;
            }
        }
    });
    CountdownGuard { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_break() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();
        let guard = spawn_countdown(Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(guard.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn guarded_task_is_aborted_on_drop() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();
        let guard = spawn_guarded(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!guard.is_finished());
        drop(guard);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_guard_cancels_ticking() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = count.clone();
        let guard = spawn_countdown(Duration::from_secs(1), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                ControlFlow::Continue(())
            }
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(guard);
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }
}
