mod ambiguous_exclusion;
mod audit_verification;
mod csprng_failure;
mod sampling_uniformity;
