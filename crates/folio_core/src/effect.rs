use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitContact {
        request_id: crate::RequestId,
        message: crate::ContactMessage,
    },
    SendChat {
        request_id: crate::RequestId,
        text: String,
    },
    ScheduleStatusHide { generation: u64, delay: Duration },
}
