//! Telemetry stream scheduler
//!
//! A fixed table of periodic senders driven by a monotonic microsecond
//! clock. Each stream reschedules by advancing its last-fire time in exact
//! period multiples rather than snapping to "now", so a late tick costs at
//! most one tick of phase error instead of accumulating drift.

/// Number of streams in the table
pub const STREAM_COUNT: usize = 4;

/// Stream identity; variant order is table order and therefore firing order
/// within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamId {
    /// Link liveness beacon
    Heartbeat,
    /// Attitude estimate
    Attitude,
    /// High-rate IMU burst
    Imu,
    /// Rate-limited drain for deferred work (parameter announcements)
    LowPriority,
}

impl StreamId {
    /// All streams in table order
    pub const ALL: [StreamId; STREAM_COUNT] = [
        StreamId::Heartbeat,
        StreamId::Attitude,
        StreamId::Imu,
        StreamId::LowPriority,
    ];
}

/// Receiver for stream firings.
///
/// The scheduler decides when, the sink decides what, typically building
/// one outbound message per call.
pub trait StreamSink {
    fn send(&mut self, stream: StreamId);
}

#[derive(Debug, Clone, Copy)]
struct Stream {
    /// Time between firings in microseconds; 0 disables the stream
    period_us: u32,
    /// Logical time of the last firing (exact period multiples)
    last_fire_us: u64,
}

/// The stream table
#[derive(Debug)]
pub struct StreamScheduler {
    streams: [Stream; STREAM_COUNT],
}

impl StreamScheduler {
    /// Create a scheduler with the built-in period table. Rates normally
    /// get overwritten from configuration during startup notification.
    pub fn new() -> Self {
        Self {
            streams: [
                // heartbeat
                Stream { period_us: 1_000_000, last_fire_us: 0 },
                // attitude
                Stream { period_us: 200_000, last_fire_us: 0 },
                // imu burst
                Stream { period_us: 1_000, last_fire_us: 0 },
                // low-priority drain
                Stream { period_us: 10_000, last_fire_us: 0 },
            ],
        }
    }

    /// Fire every due stream, in table order.
    ///
    /// A stream sufficiently overdue for several periods fires once per
    /// call; the period-multiple reschedule closes the backlog across
    /// subsequent ticks instead of bursting.
    pub fn advance<S: StreamSink>(&mut self, now_us: u64, sink: &mut S) {
        for id in StreamId::ALL {
            let stream = &mut self.streams[id as usize];
            if stream.period_us == 0 {
                continue;
            }
            let period = u64::from(stream.period_us);
            if now_us - stream.last_fire_us >= period {
                // reschedule from where the firing should have happened,
                // not from now
                stream.last_fire_us += period;
                sink.send(id);
            }
        }
    }

    /// Retarget a stream in Hz; 0 disables it. Takes effect on the next
    /// `advance` call, never fires immediately.
    pub fn set_rate(&mut self, id: StreamId, rate_hz: u32) {
        self.set_period(id, if rate_hz == 0 { 0 } else { 1_000_000 / rate_hz });
    }

    /// Set a stream period directly in microseconds; 0 disables.
    pub fn set_period(&mut self, id: StreamId, period_us: u32) {
        self.streams[id as usize].period_us = period_us;
    }

    /// Current period of a stream
    pub fn period_us(&self, id: StreamId) -> u32 {
        self.streams[id as usize].period_us
    }

    /// Logical time of the stream's last firing
    pub fn last_fire_us(&self, id: StreamId) -> u64 {
        self.streams[id as usize].last_fire_us
    }
}

impl Default for StreamScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSink {
        fired: Vec<StreamId>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { fired: Vec::new() }
        }

        fn count(&self, id: StreamId) -> usize {
            self.fired.iter().filter(|&&s| s == id).count()
        }
    }

    impl StreamSink for RecordingSink {
        fn send(&mut self, stream: StreamId) {
            self.fired.push(stream);
        }
    }

    /// Scheduler with only one enabled stream, for isolation.
    fn solo(id: StreamId, period_us: u32) -> StreamScheduler {
        let mut sched = StreamScheduler::new();
        for other in StreamId::ALL {
            sched.set_period(other, 0);
        }
        sched.set_period(id, period_us);
        sched
    }

    #[test]
    fn test_no_fire_before_period() {
        let mut sched = solo(StreamId::Heartbeat, 1_000_000);
        let mut sink = RecordingSink::new();

        sched.advance(999_999, &mut sink);
        assert!(sink.fired.is_empty());

        sched.advance(1_000_000, &mut sink);
        assert_eq!(sink.fired, vec![StreamId::Heartbeat]);
    }

    #[test]
    fn test_drift_correction_reschedules_on_period_multiples() {
        const PERIOD: u64 = 10_000;
        const EPSILON: u64 = 700;

        let mut sched = solo(StreamId::Attitude, PERIOD as u32);
        let mut sink = RecordingSink::new();

        // every tick lands epsilon late; the schedule must not absorb the
        // lateness into the phase
        let mut now = 0;
        for k in 1..=50u64 {
            now += PERIOD + EPSILON;
            sched.advance(now, &mut sink);
            assert!(sched.last_fire_us(StreamId::Attitude) % PERIOD == 0);
            assert!(sched.last_fire_us(StreamId::Attitude) >= k * PERIOD);
        }
        assert_eq!(sink.count(StreamId::Attitude), 50);
    }

    #[test]
    fn test_exact_period_multiple_after_late_ticks() {
        const PERIOD: u64 = 10_000;

        let mut sched = solo(StreamId::Imu, PERIOD as u32);
        let mut sink = RecordingSink::new();

        for k in 1..=10u64 {
            sched.advance(k * (PERIOD + 1), &mut sink);
        }
        // K firings at exactly K * P, not K * (P + epsilon)
        assert_eq!(sched.last_fire_us(StreamId::Imu), 10 * PERIOD);
        assert_eq!(sink.count(StreamId::Imu), 10);
    }

    #[test]
    fn test_overdue_stream_fires_once_per_tick() {
        let mut sched = solo(StreamId::Heartbeat, 1_000);
        let mut sink = RecordingSink::new();

        // 5 periods overdue: one catch-up firing per advance call
        sched.advance(5_000, &mut sink);
        assert_eq!(sink.count(StreamId::Heartbeat), 1);
        assert_eq!(sched.last_fire_us(StreamId::Heartbeat), 1_000);

        sched.advance(5_000, &mut sink);
        sched.advance(5_000, &mut sink);
        assert_eq!(sink.count(StreamId::Heartbeat), 3);
        assert_eq!(sched.last_fire_us(StreamId::Heartbeat), 3_000);
    }

    #[test]
    fn test_disabled_stream_never_fires() {
        let mut sched = solo(StreamId::Attitude, 10_000);
        sched.set_rate(StreamId::Attitude, 0);
        let mut sink = RecordingSink::new();

        for k in 1..100u64 {
            sched.advance(k * 100_000, &mut sink);
        }
        assert!(sink.fired.is_empty());
    }

    #[test]
    fn test_rate_to_period_conversion() {
        let mut sched = StreamScheduler::new();

        sched.set_rate(StreamId::Attitude, 100);
        assert_eq!(sched.period_us(StreamId::Attitude), 10_000);

        sched.set_rate(StreamId::Imu, 500);
        assert_eq!(sched.period_us(StreamId::Imu), 2_000);

        sched.set_rate(StreamId::Heartbeat, 0);
        assert_eq!(sched.period_us(StreamId::Heartbeat), 0);
    }

    #[test]
    fn test_reconfiguration_does_not_fire_immediately() {
        let mut sched = solo(StreamId::Heartbeat, 0);
        let mut sink = RecordingSink::new();

        sched.advance(10_000_000, &mut sink);
        sched.set_rate(StreamId::Heartbeat, 1);
        assert!(sink.fired.is_empty());
    }

    #[test]
    fn test_simultaneous_firings_in_table_order() {
        let mut sched = StreamScheduler::new();
        let mut sink = RecordingSink::new();

        // all four default periods divide 1s
        sched.advance(1_000_000, &mut sink);
        assert_eq!(
            sink.fired,
            vec![
                StreamId::Heartbeat,
                StreamId::Attitude,
                StreamId::Imu,
                StreamId::LowPriority
            ]
        );
    }

    #[test]
    fn test_default_period_table() {
        let sched = StreamScheduler::new();
        assert_eq!(sched.period_us(StreamId::Heartbeat), 1_000_000);
        assert_eq!(sched.period_us(StreamId::Attitude), 200_000);
        assert_eq!(sched.period_us(StreamId::Imu), 1_000);
        assert_eq!(sched.period_us(StreamId::LowPriority), 10_000);
    }
}
