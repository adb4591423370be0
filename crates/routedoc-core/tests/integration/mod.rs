mod concurrency;
mod registration;
mod schemas;
