mod fingerprint;
mod support;
