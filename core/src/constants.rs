/// capacity of the bounded channel feeding the view actor; network
/// collaborators briefly backpressure here during bursts
pub const EVENT_CHANNEL_CAPACITY: usize = 32;
