mod scalar;
