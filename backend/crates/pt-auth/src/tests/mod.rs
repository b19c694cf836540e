mod support;
mod token_issuer;
