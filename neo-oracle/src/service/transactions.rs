mod queue;
mod response;
