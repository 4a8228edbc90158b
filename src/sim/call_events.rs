//! 呼叫事件
//!
//! 到达事件在执行时才生成下一个呼叫（惰性生成），因此队列里同时只有
//! 一个未来到达事件，外加所有在途呼叫的结束事件。同一时刻结束事件先于到达事件执行。

use tracing::{debug, trace};

use super::event::Event;
use super::network_simulation::OpticalWorld;
use super::simulator::Simulator;
use super::world::World;
use crate::rmsa::{Call, CallId, release};

fn optical_world(world: &mut dyn World) -> &mut OpticalWorld {
    world
        .as_any_mut()
        .downcast_mut::<OpticalWorld>()
        .expect("world must be OpticalWorld")
}

/// 呼叫到达：路由 -> 再生器分配 -> 频谱分配
pub struct CallRequisition {
    pub call: Call,
}

impl Event for CallRequisition {
    #[tracing::instrument(skip(self, sim, world), fields(call = self.call.id().0))]
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = optical_world(world);
        let mut call = self.call;

        let config = w.config.clone();
        config.rmsa.admit(&mut w.topo, &mut call, &mut w.rng);
        w.stats.record(&call);
        debug!(status = ?call.status(), reason = ?call.block_reason(), "📬 呼叫评估完成");

        let id = call.id();
        sim.schedule(call.ending(), CallEnding { id });
        w.calls.insert(id, call);

        // 结束事件先入队，同一时刻先于下一个到达执行
        if w.wants_more_calls() {
            let next = w.generator.generate();
            trace!(next = next.id().0, at = %next.arrival(), "生成下一个呼叫");
            sim.schedule(next.arrival(), CallRequisition { call: next });
        }
    }
}

/// 呼叫结束：已建立的呼叫归还资源，被阻塞的呼叫什么也不做
pub struct CallEnding {
    pub id: CallId,
}

impl Event for CallEnding {
    #[tracing::instrument(skip(self, _sim, world), fields(call = self.id.0))]
    fn execute(self: Box<Self>, _sim: &mut Simulator, world: &mut dyn World) {
        let w = optical_world(world);
        let Some(mut call) = w.calls.remove(&self.id) else {
            panic!("ending for unknown call {:?}", self.id);
        };
        if let Some(reservation) = call.take_reservation() {
            trace!(slots = reservation.slots.len(), "释放呼叫资源");
            release(&mut w.topo, &reservation);
        }
    }
}
